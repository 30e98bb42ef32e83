//! Table dump handler
//!
//! GET /api/data returns every row of `sample_table` as a JSON array.

use axum::extract::State;
use tracing::debug;

use crate::response::{ApiResult, JsonBytes};
use crate::state::AppState;

/// List all rows
///
/// GET /api/data
pub async fn list_rows(State(state): State<AppState>) -> ApiResult<JsonBytes> {
    let rows = state.rows().fetch_all().await?;
    debug!(count = rows.len(), "Serving rows");
    JsonBytes::encode(&rows)
}
