//! Geographic primitives

use serde::{Deserialize, Serialize};

/// A single track vertex in GeoJSON coordinate order.
///
/// Serialized as a two-element array `[longitude, latitude]`, longitude
/// first. Every boundary (JSONB column, GPX import, HTTP body) uses this
/// order; mixing it up is the classic bug with LineString data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl From<[f64; 2]> for GeoPoint {
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self { lon, lat }
    }
}

impl From<GeoPoint> for [f64; 2] {
    fn from(point: GeoPoint) -> Self {
        [point.lon, point.lat]
    }
}

/// Rectangular lat/lon region approximating a circular search radius.
///
/// Advisory only: used as a storage query hint, never as a hard filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}
