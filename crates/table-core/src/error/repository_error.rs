//! Repository errors - failures while reading rows from the database

use thiserror::Error;

/// Errors raised by [`crate::traits::RowRepository`] implementations
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The pool could not hand out a connection (database down, auth rejected, acquire timed out)
    #[error("Connection error: {0}")]
    Connection(String),

    /// The statement failed at the database
    #[error("Query error: {0}")]
    Query(String),

    /// A returned value could not be converted into a [`crate::ColumnValue`]
    #[error("Cannot decode column `{column}` of type {type_name}: {reason}")]
    Decode {
        column: String,
        type_name: String,
        reason: String,
    },
}

impl RepositoryError {
    /// Stable error code, used as a log field
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Connection(_) => "CONNECTION_ERROR",
            Self::Query(_) => "QUERY_ERROR",
            Self::Decode { .. } => "SERIALIZATION_ERROR",
        }
    }

    #[must_use]
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}
