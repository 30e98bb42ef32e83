//! # table-api
//!
//! REST API server built with Axum framework, serving the rows of
//! `sample_table` as JSON.

pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use server::{create_app, create_app_state, run, run_server};
pub use state::AppState;
