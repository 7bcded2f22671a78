//! eco-coach library interface
//!
//! Waste classification and CO2 estimation service. Exposes the analysis
//! pipeline, persistence and HTTP router for the binary and integration tests.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod impact;
pub mod models;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

use crate::services::AnalysisService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Analysis pipeline (advisor + fallback)
    pub analysis: AnalysisService,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool, analysis: AnalysisService) -> Self {
        Self {
            db,
            analysis,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::analyze_routes())
        .merge(api::log_routes())
        .merge(api::stats_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
