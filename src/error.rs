//! Error types for Showcase.
//!
//! Uses thiserror for ergonomic error definitions that integrate
//! with axum's response system. Every error renders as the failure form of
//! the `ApiResponse` envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use showcase_models::{ApiResponse, FieldError};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // Auth errors
    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Insufficient permissions")]
    Forbidden,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    // Resource errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource already exists: {0}")]
    AlreadyExists(String),

    // Validation errors
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // File errors
    #[error("File too large: max {max_size} bytes")]
    FileTooLarge { max_size: u64 },

    #[error("Invalid file type: {0}")]
    InvalidFileType(String),

    // Rate limiting
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    // External service errors
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    // Startup errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 401
            Self::Unauthenticated | Self::InvalidToken | Self::TokenExpired => {
                StatusCode::UNAUTHORIZED
            }

            // 403
            Self::Forbidden => StatusCode::FORBIDDEN,

            // 404
            Self::NotFound(_) => StatusCode::NOT_FOUND,

            // 409
            Self::AlreadyExists(_) => StatusCode::CONFLICT,

            // 400
            Self::Validation(_) | Self::InvalidInput(_) | Self::InvalidFileType(_) => {
                StatusCode::BAD_REQUEST
            }

            // 413
            Self::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,

            // 429
            Self::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,

            // 502
            Self::Storage(_) => StatusCode::BAD_GATEWAY,

            // 500
            Self::Database(_) | Self::Configuration(_) | Self::Internal(_) | Self::Other(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to hand to clients. Server-side failures are logged in
    /// full and reported generically.
    fn public_message(&self) -> String {
        match self {
            Self::Database(_) | Self::Configuration(_) | Self::Internal(_) | Self::Other(_) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }

        let mut body: ApiResponse<()> =
            ApiResponse::failure(self.public_message()).with_code(status.as_u16());
        if let Self::Validation(errors) = self {
            body = body.with_errors(errors);
        }

        (status, Json(body)).into_response()
    }
}

// Convenience conversions
impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                Self::InvalidInput("Referenced record does not exist".to_string())
            }
            other => Self::Database(other),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

impl From<jsonwebtoken::errors::Error> for Error {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => Self::TokenExpired,
            _ => Self::InvalidToken,
        }
    }
}
