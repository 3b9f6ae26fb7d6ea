//! Nearest-training search
//!
//! Finds the scheduled training whose recorded GPS track comes closest to a
//! caller-supplied position, across all camps. The storage collaborator is
//! behind the [`TrainingStore`] trait so the search itself stays a pure,
//! read-only computation over already-fetched candidates:
//! - `PgTrainingStore` for production (PostgreSQL, leader join included)
//! - `MockTrainingStore` for tests (deterministic, no database)

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::db::queries;
use crate::services::geo;
use crate::types::{GeoPoint, TrackedTraining, TrainingWithLeader};

/// Search radius applied when the caller does not specify one, in kilometers
pub const DEFAULT_RADIUS_KM: f64 = 50.0;

/// Smallest accepted search radius, in kilometers
pub const MIN_RADIUS_KM: f64 = 0.1;

/// Storage collaborator for the nearest-training search.
///
/// Implementations must return every training that carries a non-empty GPS
/// track, paired with its owning camp id and with the leader reference
/// already resolved. Ordering matters: camps in their natural storage order,
/// trainings in insertion order within each camp. Ties at the minimum
/// distance are broken by this order.
#[async_trait]
pub trait TrainingStore: Send + Sync {
    async fn find_trainings_with_track(&self) -> Result<Vec<TrackedTraining>>;
}

/// Query for a nearest-training search. Ephemeral, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub max_distance_km: f64,
}

impl NearestQuery {
    pub fn new(latitude: f64, longitude: f64, max_distance_km: Option<f64>) -> Self {
        Self {
            latitude,
            longitude,
            max_distance_km: max_distance_km.unwrap_or(DEFAULT_RADIUS_KM),
        }
    }
}

/// The winning candidate, with the distance already rounded to 2 decimals.
#[derive(Debug, Clone)]
pub struct NearestTrainingMatch {
    pub camp_id: Uuid,
    pub training: TrainingWithLeader,
    pub distance_km: f64,
}

/// Search outcome other than a match. "No match" is a normal, expected
/// result and stays distinguishable from a storage failure; the two must
/// never collapse into an ambiguous empty success.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("No training found within {radius_km}km")]
    NoMatch { radius_km: f64 },

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Stateless nearest-training search over a [`TrainingStore`].
#[derive(Clone)]
pub struct NearestTrainingSearch {
    store: Arc<dyn TrainingStore>,
}

impl NearestTrainingSearch {
    pub fn new(store: Arc<dyn TrainingStore>) -> Self {
        Self { store }
    }

    /// Find the training closest to the queried position, within the query
    /// radius.
    ///
    /// Candidates are scanned in storage-return order with a running best:
    /// a candidate replaces the best only on a strictly smaller distance, so
    /// the first candidate at the global minimum wins ties. The minimum is
    /// taken over track vertices (see [`geo::min_distance_to_track`]), and a
    /// candidate only qualifies when that minimum is within the radius.
    pub async fn find_nearest(
        &self,
        query: &NearestQuery,
    ) -> Result<NearestTrainingMatch, SearchError> {
        let origin = GeoPoint {
            lon: query.longitude,
            lat: query.latitude,
        };

        // Advisory pre-filter hint only. The flat-earth degree conversion is
        // not provably inclusive for poleward vertices, so candidates are
        // fetched on the coarse "has a track" filter and every distance is
        // computed exactly below.
        let hint = geo::bounding_box(&origin, query.max_distance_km);
        debug!(
            min_lat = hint.min_lat,
            max_lat = hint.max_lat,
            min_lon = hint.min_lon,
            max_lon = hint.max_lon,
            "bounding box hint for nearest-training search"
        );

        let candidates = self.store.find_trainings_with_track().await?;
        debug!("Evaluating {} candidate trainings", candidates.len());

        let mut best: Option<TrackedTraining> = None;
        let mut best_distance = f64::INFINITY;

        for candidate in candidates {
            let track = match candidate.training.track.as_deref() {
                Some(track) if !track.is_empty() => track,
                _ => continue,
            };

            let distance = geo::min_distance_to_track(&origin, track);
            if distance < best_distance && distance <= query.max_distance_km {
                best_distance = distance;
                best = Some(candidate);
            }
        }

        match best {
            Some(winner) => Ok(NearestTrainingMatch {
                camp_id: winner.camp_id,
                training: winner.training,
                distance_km: round_km(best_distance),
            }),
            None => Err(SearchError::NoMatch {
                radius_km: query.max_distance_km,
            }),
        }
    }
}

/// Round a distance to 2 decimal places for API responses.
fn round_km(distance: f64) -> f64 {
    (distance * 100.0).round() / 100.0
}

// ==========================================================================
// PostgreSQL store
// ==========================================================================

/// Production [`TrainingStore`] backed by PostgreSQL.
pub struct PgTrainingStore {
    pool: PgPool,
}

impl PgTrainingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TrainingStore for PgTrainingStore {
    async fn find_trainings_with_track(&self) -> Result<Vec<TrackedTraining>> {
        queries::camp::find_trainings_with_track(&self.pool).await
    }
}

// ==========================================================================
// Mock stores (tests)
// ==========================================================================

/// In-memory [`TrainingStore`] returning a fixed candidate list, in order.
#[cfg(test)]
pub struct MockTrainingStore {
    candidates: Vec<TrackedTraining>,
}

#[cfg(test)]
impl MockTrainingStore {
    pub fn new(candidates: Vec<TrackedTraining>) -> Self {
        Self { candidates }
    }
}

#[cfg(test)]
#[async_trait]
impl TrainingStore for MockTrainingStore {
    async fn find_trainings_with_track(&self) -> Result<Vec<TrackedTraining>> {
        Ok(self.candidates.clone())
    }
}

/// [`TrainingStore`] that always fails, for error propagation tests.
#[cfg(test)]
pub struct FailingTrainingStore;

#[cfg(test)]
#[async_trait]
impl TrainingStore for FailingTrainingStore {
    async fn find_trainings_with_track(&self) -> Result<Vec<TrackedTraining>> {
        Err(anyhow::anyhow!("connection refused"))
    }
}

// ==========================================================================
// Tests
// ==========================================================================
