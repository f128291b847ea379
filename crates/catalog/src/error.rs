//! Unified error handling for the catalog service.
//!
//! Services return `Result<T, AppError>`; every guard fails fast on the
//! first violated rule and no error is retried or swallowed internally.
//! The HTTP boundary maps error kinds to status codes exactly once, here.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;

/// Application-level error taxonomy.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed input or a referenced entity is absent.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Semantically invalid combination (mismatched passwords, failed
    /// credential check, category mismatch).
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// No authenticated identity attached to the session.
    #[error("unauthorized")]
    Unauthorized,

    /// The caller's role does not permit the operation.
    #[error("forbidden")]
    Forbidden,

    /// An entity looked up by id does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Uniqueness violation.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Persistence collaborator failure; propagated, never recovered locally.
    #[error("database error: {0}")]
    Database(#[from] RepositoryError),

    /// Non-storage collaborator failure (e.g. the password hasher).
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Construct a [`AppError::BadRequest`].
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// Construct an [`AppError::InvalidArguments`].
    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::InvalidArguments(message.into())
    }

    /// Construct an [`AppError::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Construct an [`AppError::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Database(_) | Self::Internal(_)) {
            tracing::error!(error = %self, "request failed on a collaborator call");
        }

        let status = match &self {
            Self::BadRequest(_) | Self::InvalidArguments(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose collaborator details to clients
        let message = match self {
            Self::BadRequest(msg)
            | Self::InvalidArguments(msg)
            | Self::NotFound(msg)
            | Self::Conflict(msg) => msg,
            Self::Unauthorized => "You have to be logged in".to_owned(),
            Self::Forbidden => "Insufficient rights".to_owned(),
            Self::Database(_) | Self::Internal(_) => "Internal server error".to_owned(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
