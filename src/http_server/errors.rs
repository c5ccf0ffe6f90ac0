//! Bag API errors
//!
//! Uniform error translation for the HTTP surface. Callers receive
//! `{"error": "<message>"}` with no structured code; the dashboard displays
//! the message verbatim.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Bag API errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request rejected: validation failure, duplicate tag, unknown id,
    /// or an undecodable payload
    #[error("{0}")]
    Rejected(String),

    /// Store failure unrelated to the request
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Rejected(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Every store failure on a mutation path is the client-error class; the
/// list handler maps its failures to `Internal` explicitly.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Rejected(err.to_string())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
