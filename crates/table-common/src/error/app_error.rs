//! Application error types
//!
//! Unified error handling for the entire application.

use std::fmt;

use table_core::RepositoryError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Row access errors (connection, query, decode)
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    // Response body could not be produced
    #[error("Serialization error: {0}")]
    Serialization(String),

    // Configuration and startup errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl AppError {
    /// Get error code, used as a log field
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Repository(e) => e.code(),
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Create a serialization error
    #[must_use]
    pub fn serialization(msg: impl fmt::Display) -> Self {
        Self::Serialization(msg.to_string())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}
