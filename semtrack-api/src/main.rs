//! semtrack-api - Seminar tracking service
//!
//! Serves the seminar record store to the browser client: filtered listing,
//! distinct countries, and the manual create/update/delete path with
//! best-effort geocoding of missing coordinates.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use semtrack_api::services::geocoder::NominatimClient;
use semtrack_api::{build_router, AppState};
use semtrack_common::config::{RootFolderInitializer, RootFolderResolver};
use semtrack_common::db::init_database;

/// Command-line arguments for semtrack-api
#[derive(Parser, Debug)]
#[command(name = "semtrack-api")]
#[command(about = "Seminar tracking service")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3001", env = "SEMTRACK_PORT")]
    port: u16,

    /// Root folder holding the seminar database
    #[arg(short, long, env = "SEMTRACK_ROOT_FOLDER")]
    root_folder: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    info!(
        "Starting SemTrack API (semtrack-api) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let resolver = RootFolderResolver::new(args.root_folder.clone());
    let root_folder = resolver.resolve();

    let initializer = RootFolderInitializer::new(root_folder);
    initializer
        .ensure_directory_exists()
        .context("Failed to initialize root folder")?;

    let db_path = initializer.database_path();
    info!("Database path: {}", db_path.display());

    let pool = init_database(&db_path)
        .await
        .context("Failed to open database")?;
    info!("✓ Database connection established");

    let geocoder = Arc::new(
        NominatimClient::new()
            .map_err(|e| anyhow::anyhow!("Failed to create geocoding client: {}", e))?,
    );

    let state = AppState::new(pool, geocoder);
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("semtrack-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
