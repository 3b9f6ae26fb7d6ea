//! Tabor Backend - camp logistics service
//!
//! Serves the camp/training HTTP API, including the nearest-training search.

mod cli;
mod config;
mod db;
mod error;
mod handlers;
mod services;
mod types;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs directory - use LOGS_DIR env var or default to ./logs
    let logs_dir = std::env::var("LOGS_DIR")
        .unwrap_or_else(|_| "./logs".to_string());
    std::fs::create_dir_all(&logs_dir).ok();

    // File appender for persistent logs (daily rotation)
    let file_appender = RollingFileAppender::new(
        Rotation::DAILY,
        &logs_dir,
        "backend.log",
    );
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // Initialize logging - both stdout and file
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tabor_backend=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())  // stdout
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking).with_ansi(false))  // file
        .init();

    info!("Starting Tabor Backend...");

    let args = cli::Cli::parse();

    // Load configuration
    let config = config::Config::from_env()?;
    info!("Configuration loaded");

    // Connect to database
    let pool = db::create_pool(&config.database_url).await?;
    info!("Connected to PostgreSQL");

    match args.command {
        Some(cli::Command::Migrate) => {
            db::run_migrations(&pool).await?;
            return Ok(());
        }
        Some(cli::Command::ImportTrack { camp, training, file }) => {
            let track = services::gpx::track_from_gpx_file(&file)?;
            info!("Parsed {} track points from {}", track.len(), file.display());

            let updated =
                db::queries::camp::set_training_track(&pool, camp, training, &track).await?;
            if !updated {
                anyhow::bail!("No training {} in camp {}", training, camp);
            }

            info!("Track attached to training {}", training);
            return Ok(());
        }
        Some(cli::Command::Serve) | None => {}
    }

    // Run migrations
    db::run_migrations(&pool).await?;

    // Serve the HTTP API
    handlers::run_http_server(&config, pool).await
}
