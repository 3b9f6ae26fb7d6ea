//! User types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Summary of a user, used when a reference to a person (e.g. a training's
/// leader) is expanded in an API response. Never carries credentials or
/// other sensitive columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonSummary {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
}
