//! JSON request bodies
//!
//! Bodies are taken as untyped [`serde_json::Value`] so that
//! [`FieldReader`](super::validation::FieldReader) can report every field
//! error at once. Rejections render as `{"detail": ...}`.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde_json::Value;
use shared::{AppError, ErrorCode};

#[derive(Debug, Clone)]
pub struct JsonBody(pub Value);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(reject(rejection)),
        }
    }
}

fn reject(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            AppError::new(ErrorCode::UnsupportedMediaType)
        }
        other => AppError::invalid_request(format!("JSON parse error - {}", other.body_text())),
    }
}
