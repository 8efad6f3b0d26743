//! Shared types for the HR record service
//!
//! Entity models, storage records and the error types rendered by the
//! HTTP layer.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode, FieldErrors};
pub use http;
pub use serde::{Deserialize, Serialize};
