// API error taxonomy and its HTTP mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::fmt;
use thiserror::Error;

use crate::docker_repo::RuntimeError;

/// Which side of a time window failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    From,
    To,
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Boundary::From => f.write_str("from"),
            Boundary::To => f.write_str("to"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid '{boundary}' date format. Use YYYY-MM-DDTHH:MM:SSZ")]
    InvalidTimeFormat { boundary: Boundary },

    #[error("Invalid query string: {0}")]
    InvalidQuery(String),

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("docker api error: {0}")]
    RuntimeUnavailable(#[from] RuntimeError),

    #[error("statfs error: {0}")]
    FilesystemUnavailable(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::InvalidTimeFormat { .. } | ApiError::InvalidQuery(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Storage(_)
            | ApiError::RuntimeUnavailable(_)
            | ApiError::FilesystemUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(error = %self, "request failed");
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
