//! The unified error handling system for the application.
//!
//! Every fallible path returns [`ApiError`]; the `IntoResponse` impl maps
//! each variant onto the HTTP taxonomy (401 / 403 / 404 / 400 / 502 / 500)
//! with a `{"error": {"code", "message"}}` body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// A unified `Result` type for the entire application.
pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Entity absent by id.
    #[error("{0}")]
    NotFound(String),

    /// Privilege, last-superadmin or old-password violations.
    #[error("{0}")]
    Forbidden(String),

    /// Missing required upload, malformed input.
    #[error("{0}")]
    BadRequest(String),

    /// Invalid credentials, invalid/expired/stale token.
    #[error("{0}")]
    Unauthorized(String),

    /// Third-party API failures (currency upstream).
    #[error("{0}")]
    Upstream(String),

    /// Object storage gateway failures.
    #[error("storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    #[must_use]
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream(message.into())
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    const fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            Self::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            Self::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Server-side failures are logged in full but surfaced generically.
        let message = if status.is_server_error() {
            tracing::error!(code, error = %self, "request failed");
            match &self {
                Self::Storage(_) => "object storage request failed".to_string(),
                Self::Database(_) => "database error".to_string(),
                _ => "internal server error".to_string(),
            }
        } else {
            self.to_string()
        };

        let body = ErrorBody {
            error: ErrorInfo { code, message },
        };
        (status, Json(body)).into_response()
    }
}
