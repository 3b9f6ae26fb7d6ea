//! Camp and training types
//!
//! Trainings are embedded sub-entities of a camp: a camp exclusively owns
//! its trainings, and a training is only ever created, updated or deleted
//! through its owning camp. The search side of the API only reads them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::geo::GeoPoint;
use crate::types::user::PersonSummary;

/// A training with its leader reference resolved to a person summary.
///
/// `track` is the recorded GPS path as an ordered LineString, `[lon, lat]`
/// per vertex. A training without a track (or with an empty one) is never a
/// candidate for the nearest-training search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingWithLeader {
    pub id: Uuid,
    /// Insertion order within the owning camp.
    pub position: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_point: Option<String>,
    pub leader: PersonSummary,
    #[serde(default)]
    pub track: Option<Vec<GeoPoint>>,
}

/// A candidate row for the nearest-training search: a training paired with
/// the id of the camp that owns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedTraining {
    pub camp_id: Uuid,
    pub training: TrainingWithLeader,
}
