//! semtrack-api library interface
//!
//! Exposes the application state and router for integration testing.

pub mod api;
pub mod db;
pub mod error;
pub mod pipeline;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::pipeline::ResolutionPipeline;
use crate::services::geocoder::Geocoder;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Create/update workflow with its injected geocoder
    pub pipeline: Arc<ResolutionPipeline>,
    /// Service startup timestamp for uptime reporting
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool, geocoder: Arc<dyn Geocoder>) -> Self {
        Self {
            db,
            pipeline: Arc::new(ResolutionPipeline::new(geocoder)),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
///
/// The browser client is served from another origin, so CORS stays
/// permissive the whole way down (no authentication exists to protect).
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route(
            "/api/seminars",
            get(api::list_seminars).post(api::create_seminar),
        )
        .route("/api/seminars/countries", get(api::list_countries))
        .route(
            "/api/seminars/:id",
            get(api::get_seminar)
                .put(api::update_seminar)
                .delete(api::delete_seminar),
        )
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
