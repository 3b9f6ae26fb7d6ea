//! HTTP API wire types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::geo::GeoPoint;
use crate::types::user::PersonSummary;

/// A single field-level validation failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// 400 response body: one entry per invalid query parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorBody {
    pub errors: Vec<FieldError>,
}

/// Generic error body for 404 and 500 responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// 200 response body for the nearest-training search: the winning
/// training's fields merged with two derived fields: the owning camp's id
/// and the computed distance in kilometers, rounded to 2 decimal places.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearestTrainingResponse {
    pub id: Uuid,
    pub position: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_point: Option<String>,
    pub leader: PersonSummary,
    pub track: Vec<GeoPoint>,
    #[serde(rename = "_campId")]
    pub camp_id: Uuid,
    #[serde(rename = "_distanceKm")]
    pub distance_km: f64,
}
