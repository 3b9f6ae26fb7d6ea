//! HTTP handlers

pub mod ping;
pub mod training;

use std::sync::Arc;

use actix_web::web::Data;
use actix_web::{App, HttpServer};
use anyhow::Result;
use sqlx::PgPool;
use tracing::info;

use crate::config::Config;
use crate::services::nearest::{NearestTrainingSearch, PgTrainingStore};

/// State shared across HTTP handlers
pub struct AppState {
    pub search: NearestTrainingSearch,
}

/// Start the HTTP server and serve until shutdown
pub async fn run_http_server(config: &Config, pool: PgPool) -> Result<()> {
    let store = PgTrainingStore::new(pool);
    let state = Data::new(AppState {
        search: NearestTrainingSearch::new(Arc::new(store)),
    });

    info!(
        "HTTP server listening on {}:{}",
        config.http_addr, config.http_port
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(ping::ping)
            .service(training::nearest_training)
    })
    .bind((config.http_addr.as_str(), config.http_port))?
    .run()
    .await?;

    Ok(())
}
