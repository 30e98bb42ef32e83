//! Route definitions

use axum::{routing::get, Router};

use crate::handlers::{data, health};
use crate::state::AppState;

/// Path of the table dump endpoint
pub const DATA_PATH: &str = "/api/data";

/// Create the main router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route(DATA_PATH, get(data::list_rows))
        .merge(health_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}
