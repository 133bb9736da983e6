//! Server-wide error type
//!
//! Feature slices define their own error enums; route handlers convert them
//! into [`AppError`], which owns the mapping to HTTP status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::api::response::ErrorResponse;
use crate::db::is_connection_error;

/// Result type alias for handlers
pub type AppResult<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database connection unavailable: {0}")]
    ConnectionUnavailable(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Classify a sqlx error as connection loss or a plain database failure
    pub fn from_sqlx(error: sqlx::Error) -> Self {
        if is_connection_error(&error) {
            AppError::ConnectionUnavailable(error.to_string())
        } else {
            AppError::Database(error)
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_)
            | AppError::ConnectionUnavailable(_)
            | AppError::Internal(_)
            | AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::ConnectionUnavailable(_) => "SERVICE_UNAVAILABLE",
            AppError::Database(_) | AppError::Internal(_) | AppError::Io(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<roster_common::RosterError> for AppError {
    fn from(err: roster_common::RosterError) -> Self {
        match err {
            roster_common::RosterError::UnknownTable(_) => AppError::Validation(err.to_string()),
            roster_common::RosterError::Io(e) => AppError::Io(e),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }
        ErrorResponse::new(self.code(), self.to_string()).with_status(status)
    }
}
