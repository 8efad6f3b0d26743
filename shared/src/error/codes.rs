//! Unified error codes for the HR record service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 8xxx: Staff errors (employees, departments, appointments)
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as u16 values on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Malformed request body
    InvalidRequest = 5,
    /// Body is not `application/json`
    UnsupportedMediaType = 6,

    // ==================== 8xxx: Staff ====================
    /// Employee not found
    EmployeeNotFound = 8001,
    /// Department not found
    DepartmentNotFound = 8101,
    /// Appointment not found
    AppointmentNotFound = 8201,
    /// No appointment ends in the future
    NoFutureAppointments = 8202,

    // ==================== 9xxx: System ====================
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Not found.",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::UnsupportedMediaType => {
                "Unsupported media type in request. Expected 'application/json'."
            }

            ErrorCode::EmployeeNotFound => "No Employee matches the given query.",
            ErrorCode::DepartmentNotFound => "No Department matches the given query.",
            ErrorCode::AppointmentNotFound => "No Appointment matches the given query.",
            ErrorCode::NoFutureAppointments => "No future appointments found.",

            ErrorCode::DatabaseError => "A server error occurred.",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::UnsupportedMediaType),

            8001 => Ok(ErrorCode::EmployeeNotFound),
            8101 => Ok(ErrorCode::DepartmentNotFound),
            8201 => Ok(ErrorCode::AppointmentNotFound),
            8202 => Ok(ErrorCode::NoFutureAppointments),

            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip_through_u16() {
        for code in [
            ErrorCode::ValidationFailed,
            ErrorCode::EmployeeNotFound,
            ErrorCode::NoFutureAppointments,
            ErrorCode::DatabaseError,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
    }

    #[test]
    fn test_not_found_messages() {
        assert_eq!(
            ErrorCode::AppointmentNotFound.message(),
            "No Appointment matches the given query."
        );
        assert_eq!(
            ErrorCode::NoFutureAppointments.message(),
            "No future appointments found."
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::EmployeeNotFound.to_string(), "E8001");
        assert_eq!(ErrorCode::ValidationFailed.to_string(), "E0002");
    }
}
