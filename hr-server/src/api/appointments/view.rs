//! Appointment representations
//!
//! Reads nest the full employee representation for the owner and every
//! participant; writes take hyperlinks.

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;
use serde_json::Value;
use shared::error::FieldErrors;
use shared::models::{AppointmentDetail, AppointmentRecord};
use shared::util::millis_to_datetime;
use sqlx::SqlitePool;
use std::collections::HashSet;

use crate::api::employees::view::{EmployeeView, employee_view};
use crate::db::repository::employee;
use crate::utils::validation::{MAX_DESCRIPTION_LEN, MAX_TITLE_LEN, OBJECT_MISSING};
use crate::utils::{AppResult, FieldReader, Links, Resource, TextRule, WriteMode};

#[derive(Debug, Serialize)]
pub struct AppointmentView {
    pub url: String,
    pub id: i64,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    pub title: String,
    pub description: String,
    pub employee: Option<EmployeeView>,
    pub participants: Vec<EmployeeView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub fn appointment_view(links: &Links, detail: &AppointmentDetail) -> AppointmentView {
    let appointment = &detail.appointment;
    AppointmentView {
        url: links.detail(Resource::Appointment, appointment.id),
        id: appointment.id,
        start_datetime: appointment.start_datetime(),
        end_datetime: appointment.end_datetime(),
        title: appointment.title.clone(),
        description: appointment.description.clone(),
        employee: detail.employee.as_ref().map(|e| employee_view(links, e)),
        participants: detail
            .participants
            .iter()
            .map(|p| employee_view(links, p))
            .collect(),
        created_at: millis_to_datetime(appointment.created_at),
        updated_at: millis_to_datetime(appointment.updated_at),
    }
}

#[derive(Debug, Default)]
pub struct AppointmentInput {
    pub start_datetime: Option<DateTime<Utc>>,
    pub end_datetime: Option<DateTime<Utc>>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub employee: Option<Option<i64>>,
    pub participants: Option<Vec<i64>>,
}

pub fn parse(
    body: &Value,
    mode: WriteMode,
    links: &Links,
    offset: FixedOffset,
) -> Result<AppointmentInput, FieldErrors> {
    let mut reader = FieldReader::new(body, mode)?;
    let input = AppointmentInput {
        start_datetime: reader.datetime("start_datetime", true, offset),
        end_datetime: reader.datetime("end_datetime", true, offset),
        title: reader.text("title", TextRule::required(MAX_TITLE_LEN)),
        description: reader.text("description", TextRule::optional(MAX_DESCRIPTION_LEN)),
        employee: reader.hyperlink("employee", true, links, Resource::Employee),
        participants: reader.hyperlinks("participants", links, Resource::Employee),
    };
    reader.finish()?;
    Ok(input)
}

/// Overlay the input on the stored appointment; participants not sent keep
/// their current value (empty on create)
pub async fn to_record(
    pool: &SqlitePool,
    input: AppointmentInput,
    existing: Option<&AppointmentDetail>,
) -> AppResult<AppointmentRecord> {
    let mut wanted: Vec<i64> = input.participants.clone().unwrap_or_default();
    if let Some(Some(owner)) = input.employee {
        wanted.push(owner);
    }
    wanted.sort_unstable();
    wanted.dedup();

    let found: HashSet<i64> = employee::find_by_ids(pool, &wanted)
        .await?
        .into_iter()
        .map(|e| e.id)
        .collect();

    let mut errors = FieldErrors::new();
    if let Some(Some(owner)) = input.employee
        && !found.contains(&owner)
    {
        errors.add("employee", OBJECT_MISSING);
    }
    if let Some(participants) = &input.participants
        && participants.iter().any(|id| !found.contains(id))
    {
        errors.add("participants", OBJECT_MISSING);
    }
    errors.into_result()?;

    let base = existing.map(AppointmentRecord::from).unwrap_or_default();
    Ok(AppointmentRecord {
        start_datetime: input.start_datetime.unwrap_or(base.start_datetime),
        end_datetime: input.end_datetime.unwrap_or(base.end_datetime),
        title: input.title.unwrap_or(base.title),
        description: input.description.unwrap_or(base.description),
        employee_id: input.employee.unwrap_or(base.employee_id),
        participant_ids: input.participants.unwrap_or(base.participant_ids),
    })
}
