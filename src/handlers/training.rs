//! Training search handlers

use actix_web::web::{Data, Query};
use actix_web::HttpResponse;
use serde::Deserialize;
use tracing::debug;

use crate::error::ApiError;
use crate::handlers::AppState;
use crate::services::nearest::{NearestQuery, NearestTrainingMatch, SearchError, MIN_RADIUS_KM};
use crate::types::{FieldError, NearestTrainingResponse};

/// Raw query parameters of GET /camps/trainings/nearest. Everything is
/// optional here so that missing fields produce field-level errors instead
/// of a framework-generated rejection.
#[derive(Debug, Deserialize)]
pub struct NearestParams {
    latitude: Option<f64>,
    longitude: Option<f64>,
    #[serde(rename = "maxDistance")]
    max_distance: Option<f64>,
}

/// Validate raw query parameters into a search query.
///
/// Collects every violation instead of stopping at the first, so a request
/// with a bad latitude AND a bad longitude reports both.
fn validate(params: &NearestParams) -> Result<NearestQuery, ApiError> {
    let mut errors = Vec::new();

    let latitude = match params.latitude {
        Some(v) if (-90.0..=90.0).contains(&v) => Some(v),
        Some(_) => {
            errors.push(FieldError::new(
                "latitude",
                "latitude must be a number between -90 and 90",
            ));
            None
        }
        None => {
            errors.push(FieldError::new("latitude", "latitude is required"));
            None
        }
    };

    let longitude = match params.longitude {
        Some(v) if (-180.0..=180.0).contains(&v) => Some(v),
        Some(_) => {
            errors.push(FieldError::new(
                "longitude",
                "longitude must be a number between -180 and 180",
            ));
            None
        }
        None => {
            errors.push(FieldError::new("longitude", "longitude is required"));
            None
        }
    };

    if let Some(radius) = params.max_distance {
        if !radius.is_finite() || radius < MIN_RADIUS_KM {
            errors.push(FieldError::new(
                "maxDistance",
                format!("maxDistance must be a positive number, at least {MIN_RADIUS_KM}"),
            ));
        }
    }

    match (latitude, longitude) {
        (Some(latitude), Some(longitude)) if errors.is_empty() => {
            Ok(NearestQuery::new(latitude, longitude, params.max_distance))
        }
        _ => Err(ApiError::Validation(errors)),
    }
}

fn to_response(found: NearestTrainingMatch) -> NearestTrainingResponse {
    NearestTrainingResponse {
        id: found.training.id,
        position: found.training.position,
        starts_at: found.training.starts_at,
        meeting_point: found.training.meeting_point,
        leader: found.training.leader,
        track: found.training.track.unwrap_or_default(),
        camp_id: found.camp_id,
        distance_km: found.distance_km,
    }
}

/// Handle GET /camps/trainings/nearest
///
/// Returns the closest tracked training within the requested radius
/// (default 50 km), or 404 when nothing qualifies.
#[actix_web::get("/camps/trainings/nearest")]
pub async fn nearest_training(
    params: Query<NearestParams>,
    state: Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let query = validate(&params)?;
    debug!(
        latitude = query.latitude,
        longitude = query.longitude,
        radius_km = query.max_distance_km,
        "Nearest-training search"
    );

    match state.search.find_nearest(&query).await {
        Ok(found) => Ok(HttpResponse::Ok().json(to_response(found))),
        Err(not_found @ SearchError::NoMatch { .. }) => {
            Err(ApiError::NotFound(not_found.to_string()))
        }
        Err(SearchError::Store(e)) => Err(ApiError::Internal(e)),
    }
}

// ==========================================================================
// Tests
// ==========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::nearest::{MockTrainingStore, NearestTrainingSearch};
    use crate::types::{
        ErrorBody, GeoPoint, PersonSummary, TrackedTraining, TrainingWithLeader,
        ValidationErrorBody,
    };
    use actix_web::{test, App};
    use std::sync::Arc;
    use uuid::Uuid;

    fn candidate(track: Vec<[f64; 2]>) -> TrackedTraining {
        TrackedTraining {
            camp_id: Uuid::new_v4(),
            training: TrainingWithLeader {
                id: Uuid::new_v4(),
                position: 0,
                starts_at: None,
                meeting_point: Some("Ouchy pier".to_string()),
                leader: PersonSummary {
                    id: Uuid::new_v4(),
                    firstname: "Petr".to_string(),
                    lastname: "Dvorak".to_string(),
                },
                track: Some(track.into_iter().map(GeoPoint::from).collect()),
            },
        }
    }

    fn state(candidates: Vec<TrackedTraining>) -> Data<AppState> {
        Data::new(AppState {
            search: NearestTrainingSearch::new(Arc::new(MockTrainingStore::new(candidates))),
        })
    }

    #[actix_web::test]
    async fn test_returns_nearest_training_with_derived_fields() {
        let close = candidate(vec![[6.632, 46.52]]);
        let far = candidate(vec![[6.6323, 47.3651]]);
        let expected_camp = close.camp_id;
        let app = test::init_service(
            App::new().app_data(state(vec![far, close])).service(nearest_training),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/camps/trainings/nearest?latitude=46.5197&longitude=6.6323")
            .to_request();
        let body: NearestTrainingResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.camp_id, expected_camp);
        assert!(body.distance_km < 5.0);
        assert_eq!(body.leader.firstname, "Petr");
        assert_eq!(body.leader.lastname, "Dvorak");
        assert!(!body.track.is_empty());
    }

    #[actix_web::test]
    async fn test_distance_field_is_rounded_to_two_decimals() {
        let app = test::init_service(
            App::new()
                .app_data(state(vec![candidate(vec![[6.6323, 46.8615]])]))
                .service(nearest_training),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/camps/trainings/nearest?latitude=46.5197&longitude=6.6323")
            .to_request();
        let body: NearestTrainingResponse = test::call_and_read_body_json(&app, req).await;

        let scaled = body.distance_km * 100.0;
        assert!((scaled - scaled.round()).abs() < 1e-9);
    }

    #[actix_web::test]
    async fn test_no_candidates_yields_404_with_radius_in_message() {
        let app =
            test::init_service(App::new().app_data(state(vec![])).service(nearest_training)).await;

        let req = test::TestRequest::get()
            .uri("/camps/trainings/nearest?latitude=46.5197&longitude=6.6323")
            .to_request();
        let response = test::call_service(&app, req).await;

        assert_eq!(response.status(), 404);
        let body: ErrorBody = test::read_body_json(response).await;
        assert!(body.error.contains("No training found"));
        assert!(body.error.contains("50km"));
    }

    #[actix_web::test]
    async fn test_custom_radius_is_echoed_in_404_message() {
        let app =
            test::init_service(App::new().app_data(state(vec![])).service(nearest_training)).await;

        let req = test::TestRequest::get()
            .uri("/camps/trainings/nearest?latitude=47.3769&longitude=8.5417&maxDistance=12.5")
            .to_request();
        let response = test::call_service(&app, req).await;

        assert_eq!(response.status(), 404);
        let body: ErrorBody = test::read_body_json(response).await;
        assert!(body.error.contains("12.5km"), "got: {}", body.error);
    }

    #[actix_web::test]
    async fn test_latitude_out_of_range_is_rejected() {
        let app =
            test::init_service(App::new().app_data(state(vec![])).service(nearest_training)).await;

        let req = test::TestRequest::get()
            .uri("/camps/trainings/nearest?latitude=91&longitude=6.6323")
            .to_request();
        let response = test::call_service(&app, req).await;

        assert_eq!(response.status(), 400);
        let body: ValidationErrorBody = test::read_body_json(response).await;
        assert_eq!(body.errors.len(), 1);
        assert_eq!(body.errors[0].field, "latitude");
        assert!(body.errors[0].message.contains("-90"));
        assert!(body.errors[0].message.contains("90"));
    }

    #[actix_web::test]
    async fn test_longitude_out_of_range_is_rejected() {
        let app =
            test::init_service(App::new().app_data(state(vec![])).service(nearest_training)).await;

        let req = test::TestRequest::get()
            .uri("/camps/trainings/nearest?latitude=46.5&longitude=181")
            .to_request();
        let response = test::call_service(&app, req).await;

        assert_eq!(response.status(), 400);
        let body: ValidationErrorBody = test::read_body_json(response).await;
        assert_eq!(body.errors[0].field, "longitude");
        assert!(body.errors[0].message.contains("-180"));
    }

    #[actix_web::test]
    async fn test_missing_coordinates_report_both_fields() {
        let app =
            test::init_service(App::new().app_data(state(vec![])).service(nearest_training)).await;

        let req = test::TestRequest::get().uri("/camps/trainings/nearest").to_request();
        let response = test::call_service(&app, req).await;

        assert_eq!(response.status(), 400);
        let body: ValidationErrorBody = test::read_body_json(response).await;
        let fields: Vec<&str> = body.errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"latitude"));
        assert!(fields.contains(&"longitude"));
    }

    #[actix_web::test]
    async fn test_negative_and_subminimum_radius_are_rejected() {
        let app =
            test::init_service(App::new().app_data(state(vec![])).service(nearest_training)).await;

        for radius in ["-10", "0.05"] {
            let uri = format!(
                "/camps/trainings/nearest?latitude=46.5&longitude=6.6&maxDistance={radius}"
            );
            let req = test::TestRequest::get().uri(&uri).to_request();
            let response = test::call_service(&app, req).await;

            assert_eq!(response.status(), 400, "radius {radius} must be rejected");
            let body: ValidationErrorBody = test::read_body_json(response).await;
            assert_eq!(body.errors[0].field, "maxDistance");
            assert!(body.errors[0].message.contains("positive number"));
            assert!(body.errors[0].message.contains("0.1"));
        }
    }

    #[actix_web::test]
    async fn test_omitted_radius_equals_explicit_default() {
        let candidates = vec![candidate(vec![[6.6323, 46.8615]])];
        let app = test::init_service(
            App::new().app_data(state(candidates)).service(nearest_training),
        )
        .await;

        let implicit = test::TestRequest::get()
            .uri("/camps/trainings/nearest?latitude=46.5197&longitude=6.6323")
            .to_request();
        let explicit = test::TestRequest::get()
            .uri("/camps/trainings/nearest?latitude=46.5197&longitude=6.6323&maxDistance=50")
            .to_request();

        let implicit_body: NearestTrainingResponse =
            test::call_and_read_body_json(&app, implicit).await;
        let explicit_body: NearestTrainingResponse =
            test::call_and_read_body_json(&app, explicit).await;

        assert_eq!(implicit_body.id, explicit_body.id);
        assert_eq!(implicit_body.distance_km, explicit_body.distance_km);
    }

    #[::core::prelude::v1::test]
    fn test_validate_accepts_boundary_coordinates() {
        let params = NearestParams {
            latitude: Some(-90.0),
            longitude: Some(180.0),
            max_distance: None,
        };
        let query = validate(&params).unwrap();
        assert_eq!(query.latitude, -90.0);
        assert_eq!(query.longitude, 180.0);
        assert_eq!(query.max_distance_km, 50.0);
    }

    #[::core::prelude::v1::test]
    fn test_validate_rejects_nan_radius() {
        let params = NearestParams {
            latitude: Some(46.5),
            longitude: Some(6.6),
            max_distance: Some(f64::NAN),
        };
        assert!(validate(&params).is_err());
    }
}
