//! Error handling utilities for repositories

use sqlx::Error as SqlxError;
use table_core::RepositoryError;

/// Failure while checking a connection out of the pool
pub fn map_connection_error(e: SqlxError) -> RepositoryError {
    RepositoryError::Connection(e.to_string())
}

/// Failure while running a statement on an acquired connection
pub fn map_query_error(e: SqlxError) -> RepositoryError {
    match e.as_database_error() {
        Some(db_err) => RepositoryError::Query(match db_err.code() {
            Some(code) => format!("{} (SQLSTATE {code})", db_err.message()),
            None => db_err.message().to_string(),
        }),
        None => RepositoryError::Query(e.to_string()),
    }
}
