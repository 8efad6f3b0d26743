//! Unified error system
//!
//! - [`ErrorCode`]: Standardized error codes
//! - [`ErrorCategory`]: Classification of errors by code range
//! - [`FieldErrors`]: Field-keyed validation messages
//! - [`AppError`]: Error type rendered by the HTTP layer
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 8xxx: Staff errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, FieldErrors};
//!
//! let err = AppError::new(ErrorCode::EmployeeNotFound);
//! assert_eq!(err.message, "No Employee matches the given query.");
//!
//! let mut fields = FieldErrors::new();
//! fields.add("email", "Enter a valid email address.");
//! let err = AppError::validation(fields);
//! assert_eq!(err.code, ErrorCode::ValidationFailed);
//! ```

mod category;
mod codes;
mod fields;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use fields::FieldErrors;
pub use types::{AppError, AppResult, ErrorDetail};
