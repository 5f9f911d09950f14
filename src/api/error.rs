//! API Error Types
//!
//! Failures a handler can report, and their HTTP rendering. Guest book and
//! excitement writes never fail from the caller's point of view, so the list
//! is short.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::content::UnknownTab;
use crate::storage::StorageError;

#[derive(Error, Debug)]
pub enum ApiError {
    /// `/api/v1/tabs/:tab` with a slug the page does not have
    #[error(transparent)]
    UnknownTab(#[from] UnknownTab),

    /// Backing store could not be read
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] StorageError),

    #[error("Internal error: {0}")]
    Internal(String),

    /// Listener bind or accept failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UnknownTab(_) => StatusCode::NOT_FOUND,
            ApiError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) | ApiError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code for the error body
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::UnknownTab(_) => "UNKNOWN_TAB",
            ApiError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            ApiError::Internal(_) => "INTERNAL_ERROR",
            ApiError::Io(_) => "IO_ERROR",
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let request_id = uuid::Uuid::new_v4().to_string();

        if status.is_server_error() {
            tracing::error!(request_id = %request_id, code = self.code(), error = %self, "Request failed");
        } else {
            tracing::debug!(request_id = %request_id, code = self.code(), error = %self, "Request rejected");
        }

        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
