//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use table_common::{AppConfig, AppError};
use table_db::{create_pool, DatabaseConfig, PgRowRepository};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = create_router();
    let router = apply_middleware(router);
    router.with_state(state)
}

/// Initialize the connection pool and create AppState
///
/// The pool is lazy: nothing is dialed until the first request needs a connection.
pub fn create_app_state(config: &AppConfig) -> AppState {
    let db_config = DatabaseConfig::from(&config.database);
    info!(
        host = %db_config.host,
        port = db_config.port,
        database = %db_config.database,
        max_connections = db_config.max_connections,
        "Creating PostgreSQL connection pool"
    );
    let pool = create_pool(&db_config);

    AppState::new(Arc::new(PgRowRepository::new(pool)))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Backend listening at http://localhost:{}", addr.port());

    axum::serve(listener, app)
        .await
        .map_err(AppError::internal)?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {e}")))?;

    // Create app state
    let state = create_app_state(&config);

    // Build application
    let app = create_app(state);

    // Run server
    run_server(app, addr).await
}
