//! Repository Module
//!
//! Free async functions over `&SqlitePool` (or a transaction connection).
//! Writes run inside one transaction; constraint violations reported by
//! SQLite are turned into field errors.

pub mod appointment;
pub mod department;
pub mod employee;

use shared::error::{AppError, ErrorCode, FieldErrors};
use shared::models::{Position, end_after_start_message};
use sqlx::error::ErrorKind;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{}", .0.message())]
    NotFound(ErrorCode),

    #[error("Validation error: {0}")]
    Validation(FieldErrors),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<FieldErrors> for RepoError {
    fn from(errors: FieldErrors) -> Self {
        RepoError::Validation(errors)
    }
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err
            && let Some(errors) = constraint_errors(db_err.kind(), db_err.message())
        {
            return RepoError::Validation(errors);
        }
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(code) => AppError::new(code),
            RepoError::Validation(fields) => AppError::validation(fields),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Reference to a row that is not there
pub(crate) fn object_missing(id: i64) -> String {
    format!("Invalid pk \"{id}\" - object does not exist.")
}

/// Map a SQLite constraint failure to the field error a client would have
/// seen from the pre-write checks.
fn constraint_errors(kind: ErrorKind, message: &str) -> Option<FieldErrors> {
    match kind {
        ErrorKind::UniqueViolation => {
            let (field, msg) = if message.contains("employee.email") {
                ("email", employee::EMAIL_TAKEN)
            } else if message.contains("department.name") {
                ("name", department::NAME_TAKEN)
            } else if message.contains("department.manager_id") {
                ("manager", department::MANAGER_TAKEN)
            } else {
                return None;
            };
            Some(FieldErrors::single(field, msg))
        }
        ErrorKind::CheckViolation => {
            if message.contains(shared::models::END_AFTER_START) {
                Some(FieldErrors::single(
                    FieldErrors::NON_FIELD,
                    end_after_start_message(),
                ))
            } else if message.contains("email") {
                Some(FieldErrors::single("email", "Email is mandatory."))
            } else if message.contains("position") {
                let allowed = Position::ALL.map(|p| p.as_str()).join(", ");
                Some(FieldErrors::single(
                    "position",
                    format!("Position must be one of: {allowed}."),
                ))
            } else {
                None
            }
        }
        _ => None,
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_mapping() {
        let errors = constraint_errors(
            ErrorKind::UniqueViolation,
            "UNIQUE constraint failed: employee.email",
        )
        .unwrap();
        assert_eq!(errors.get("email").unwrap(), &[employee::EMAIL_TAKEN.to_string()]);

        let errors = constraint_errors(
            ErrorKind::UniqueViolation,
            "UNIQUE constraint failed: department.manager_id",
        )
        .unwrap();
        assert!(errors.contains("manager"));

        assert!(constraint_errors(ErrorKind::UniqueViolation, "UNIQUE constraint failed: x.y").is_none());
    }

    #[test]
    fn test_check_violation_mapping() {
        let errors = constraint_errors(
            ErrorKind::CheckViolation,
            "CHECK constraint failed: end_after_start",
        )
        .unwrap();
        assert_eq!(
            errors.get(FieldErrors::NON_FIELD).unwrap(),
            &[end_after_start_message()]
        );
        assert!(constraint_errors(ErrorKind::ForeignKeyViolation, "FOREIGN KEY constraint failed").is_none());
    }

    #[test]
    fn test_repo_error_into_app_error() {
        let err: AppError = RepoError::NotFound(ErrorCode::EmployeeNotFound).into();
        assert_eq!(err.code, ErrorCode::EmployeeNotFound);

        let err: AppError = RepoError::Database("disk I/O error".into()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
