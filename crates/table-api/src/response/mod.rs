//! Response types and error handling for API endpoints
//!
//! Every failure collapses into the same opaque 500 response; the detail only
//! goes to the server log.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use table_common::AppError;
use table_core::RepositoryError;
use thiserror::Error;
use tracing::error;

/// Body sent to clients for any server-side failure
pub const GENERIC_ERROR_BODY: &str = "Error";

/// API error type for consistent error responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    App(#[from] AppError),
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        Self::App(AppError::from(err))
    }
}

impl ApiError {
    /// Get error code for logs
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::App(e) => e.error_code(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(code = self.error_code(), error = %self, "Request failed");

        // Every failure is reported to clients the same way
        (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR_BODY).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// 200 response carrying an already-serialized JSON document
pub struct JsonBytes(pub Vec<u8>);

impl JsonBytes {
    /// Serialize `value`, reporting failure as an [`AppError::Serialization`]
    pub fn encode<T: serde::Serialize + ?Sized>(value: &T) -> ApiResult<Self> {
        serde_json::to_vec(value)
            .map(Self)
            .map_err(|e| AppError::serialization(e).into())
    }
}

impl IntoResponse for JsonBytes {
    fn into_response(self) -> Response {
        (
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            )],
            self.0,
        )
            .into_response()
    }
}
