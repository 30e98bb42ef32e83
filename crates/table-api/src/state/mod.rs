//! Application state
//!
//! Holds the shared state for the Axum application. The row repository (and
//! the connection pool behind it) is constructed once at startup and injected
//! here rather than living in a global.

use std::sync::Arc;

use table_core::RowRepository;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    rows: Arc<dyn RowRepository>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(rows: Arc<dyn RowRepository>) -> Self {
        Self { rows }
    }

    /// Get the row repository
    pub fn rows(&self) -> &dyn RowRepository {
        self.rows.as_ref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("rows", &"RowRepository")
            .field("pool", &self.rows.pool_status())
            .finish()
    }
}
