//! Application error type and its HTTP rendering

use super::codes::ErrorCode;
use super::fields::FieldErrors;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application error with structured error code
///
/// Client-facing errors come in two shapes:
/// - validation failures carry [`FieldErrors`] and render as `{field: [messages]}`
/// - everything else renders as `{"detail": message}`
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Field-level validation messages
    pub fields: Option<FieldErrors>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            fields: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            fields: None,
        }
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Validation error carrying field-level messages
    pub fn validation(fields: FieldErrors) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: fields.to_string(),
            fields: Some(fields),
        }
    }

    /// Validation error for a single field
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::validation(FieldErrors::single(field, message))
    }

    /// Malformed request body (bad JSON, wrong content type)
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }

    /// Generic not found error
    pub fn not_found() -> Self {
        Self::new(ErrorCode::NotFound)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }
}

impl From<FieldErrors> for AppError {
    fn from(fields: FieldErrors) -> Self {
        Self::validation(fields)
    }
}

/// `{"detail": "..."}` body used for every non-validation error
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorDetail {
    pub detail: String,
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();

        if matches!(self.code.category(), super::category::ErrorCategory::System) {
            // 不向客户端暴露内部错误细节
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
            let body = ErrorDetail {
                detail: self.code.message().to_string(),
            };
            return (status, Json(body)).into_response();
        }

        match self.fields {
            Some(fields) => (status, Json(fields)).into_response(),
            None => (
                status,
                Json(ErrorDetail {
                    detail: self.message,
                }),
            )
                .into_response(),
        }
    }
}
