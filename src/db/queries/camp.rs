//! Camp and training database queries
//!
//! Trainings are owned by their camp; every query goes through the camp
//! relation and never addresses a training without its `camp_id`.

use anyhow::Result;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::types::{GeoPoint, PersonSummary, TrackedTraining, TrainingWithLeader};

/// Row shape for the candidate query, with the leader join flattened.
#[derive(Debug, FromRow)]
struct TrackedTrainingRow {
    camp_id: Uuid,
    id: Uuid,
    position: i32,
    starts_at: Option<chrono::DateTime<chrono::Utc>>,
    meeting_point: Option<String>,
    track: Json<Vec<GeoPoint>>,
    leader_id: Uuid,
    leader_firstname: String,
    leader_lastname: String,
}

impl From<TrackedTrainingRow> for TrackedTraining {
    fn from(row: TrackedTrainingRow) -> Self {
        TrackedTraining {
            camp_id: row.camp_id,
            training: TrainingWithLeader {
                id: row.id,
                position: row.position,
                starts_at: row.starts_at,
                meeting_point: row.meeting_point,
                leader: PersonSummary {
                    id: row.leader_id,
                    firstname: row.leader_firstname,
                    lastname: row.leader_lastname,
                },
                track: Some(row.track.0),
            },
        }
    }
}

/// Fetch every training that carries a non-empty GPS track, with the leader
/// reference expanded.
///
/// The non-empty-track predicate is the coarse candidate filter for the
/// nearest-training search; all distance filtering happens in the service.
/// Ordering is part of the contract: camps in creation order, trainings in
/// insertion order within each camp, so distance ties resolve
/// deterministically to the first stored candidate.
pub async fn find_trainings_with_track(pool: &PgPool) -> Result<Vec<TrackedTraining>> {
    let rows = sqlx::query_as::<_, TrackedTrainingRow>(
        r#"
        SELECT
            c.id AS camp_id,
            t.id, t.position, t.starts_at, t.meeting_point, t.track,
            u.id AS leader_id,
            u.firstname AS leader_firstname,
            u.lastname AS leader_lastname
        FROM trainings t
        JOIN camps c ON c.id = t.camp_id
        JOIN users u ON u.id = t.leader_id
        WHERE t.track IS NOT NULL AND jsonb_array_length(t.track) > 0
        ORDER BY c.created_at ASC, t.position ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(TrackedTraining::from).collect())
}

/// Attach a recorded track to a training, addressed through its owning camp.
///
/// Returns `false` when the (camp, training) pair does not exist.
pub async fn set_training_track(
    pool: &PgPool,
    camp_id: Uuid,
    training_id: Uuid,
    track: &[GeoPoint],
) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE trainings
        SET track = $1, updated_at = NOW()
        WHERE id = $2 AND camp_id = $3
        "#,
    )
    .bind(Json(track))
    .bind(training_id)
    .bind(camp_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
