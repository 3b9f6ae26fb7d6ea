//! Ping handler for health checks

use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Serialize, Deserialize)]
struct PongResponse {
    message: String,
    timestamp: String,
}

/// Handle GET /ping
#[actix_web::get("/ping")]
pub async fn ping() -> HttpResponse {
    debug!("Received ping request");

    HttpResponse::Ok().json(PongResponse {
        message: "Pong".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_ping_returns_pong() {
        let app = test::init_service(App::new().service(ping)).await;

        let req = test::TestRequest::get().uri("/ping").to_request();
        let body: PongResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.message, "Pong");
        assert!(!body.timestamp.is_empty());
    }
}
