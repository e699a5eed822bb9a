/// Error types for the blog API
///
/// This module defines all error types that can occur in the service.
/// Errors are converted to appropriate HTTP responses for API clients.
use actix_web::{error::ResponseError, http::header, http::StatusCode, HttpResponse};
use thiserror::Error;

use crate::db::DbError;
use crate::services::email::EmailError;

/// Result type for blog-api operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Store operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Email provider operation failed
    #[error("Email error: {0}")]
    Email(String),

    /// Resource not found
    #[error("{0}")]
    NotFound(String),

    /// Unauthorized access
    #[error("{0}")]
    Unauthorized(String),

    /// Bad request
    #[error("{0}")]
    BadRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Email(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let mut builder = HttpResponse::build(status);

        // Basic-auth challenges must carry the realm so browsers prompt.
        if matches!(self, AppError::Unauthorized(_)) {
            builder.insert_header((header::WWW_AUTHENTICATE, r#"Basic realm="Admin Area""#));
        }

        builder.json(serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }))
    }
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<EmailError> for AppError {
    fn from(err: EmailError) -> Self {
        AppError::Email(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
