//! Appointment Model

use super::EmployeeWithDepartment;
use crate::error::FieldErrors;
use crate::util::millis_to_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the storage CHECK constraint guarding the time range
pub const END_AFTER_START: &str = "end_after_start";

/// Appointment entity (预约)
///
/// Times are UTC epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Appointment {
    pub id: i64,
    pub start_at: i64,
    pub end_at: i64,
    pub title: String,
    pub description: String,
    /// Owner; the appointment is deleted with it
    pub employee_id: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Appointment {
    pub fn start_datetime(&self) -> DateTime<Utc> {
        millis_to_datetime(self.start_at)
    }

    pub fn end_datetime(&self) -> DateTime<Utc> {
        millis_to_datetime(self.end_at)
    }
}

impl fmt::Display for Appointment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} - {})",
            self.title,
            self.start_datetime(),
            self.end_datetime()
        )
    }
}

/// Appointment with owner and participants resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentDetail {
    pub appointment: Appointment,
    pub employee: Option<EmployeeWithDepartment>,
    pub participants: Vec<EmployeeWithDepartment>,
}

/// Storage record written for create / update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    pub title: String,
    pub description: String,
    pub employee_id: Option<i64>,
    pub participant_ids: Vec<i64>,
}

impl AppointmentRecord {
    /// Entity-level rules: the time range must be non-empty
    pub fn clean(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.end_datetime <= self.start_datetime {
            errors.add(FieldErrors::NON_FIELD, end_after_start_message());
        }
        errors.into_result()
    }
}

impl From<&AppointmentDetail> for AppointmentRecord {
    fn from(detail: &AppointmentDetail) -> Self {
        let appointment = &detail.appointment;
        Self {
            start_datetime: appointment.start_datetime(),
            end_datetime: appointment.end_datetime(),
            title: appointment.title.clone(),
            description: appointment.description.clone(),
            employee_id: appointment.employee_id,
            participant_ids: detail.participants.iter().map(|p| p.id).collect(),
        }
    }
}

/// Message reported when the time range constraint is violated
pub fn end_after_start_message() -> String {
    format!("Constraint \"{END_AFTER_START}\" is violated.")
}
