//! Employee representations
//!
//! Read shape nests the department; the write shape takes it as a hyperlink.

use serde::Serialize;
use serde_json::Value;
use shared::error::FieldErrors;
use shared::models::{Employee, EmployeeRecord, EmployeeWithDepartment, Position};
use sqlx::SqlitePool;

use crate::api::departments::view::{DepartmentView, department_view};
use crate::db::repository::department;
use crate::utils::validation::{MAX_EMAIL_LEN, MAX_NAME_LEN, OBJECT_MISSING};
use crate::utils::{AppError, AppResult, FieldReader, Links, Resource, TextRule, WriteMode};

#[derive(Debug, Serialize)]
pub struct EmployeeView {
    pub url: String,
    pub id: i64,
    pub name: String,
    pub email: String,
    pub position: Position,
    pub is_manager: bool,
    pub department: Option<DepartmentView>,
}

pub fn employee_view(links: &Links, row: &EmployeeWithDepartment) -> EmployeeView {
    EmployeeView {
        url: links.detail(Resource::Employee, row.id),
        id: row.id,
        name: row.name.clone(),
        email: row.email.clone(),
        position: row.position,
        is_manager: row.is_manager(),
        department: row.department().map(|d| department_view(links, &d)),
    }
}

/// Fields present in a write body
#[derive(Debug, Default)]
pub struct EmployeeInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub position: Option<Position>,
    pub department: Option<Option<i64>>,
}

pub fn parse(body: &Value, mode: WriteMode, links: &Links) -> Result<EmployeeInput, FieldErrors> {
    let mut reader = FieldReader::new(body, mode)?;
    let input = EmployeeInput {
        name: reader.text("name", TextRule::required(MAX_NAME_LEN)),
        email: reader.email("email", TextRule::required(MAX_EMAIL_LEN)),
        position: reader.choice("position", false, Position::parse),
        department: reader.hyperlink("department", false, links, Resource::Department),
    };
    reader.finish()?;
    Ok(input)
}

/// Overlay the input on the stored employee (or on defaults for a create)
pub async fn to_record(
    pool: &SqlitePool,
    input: EmployeeInput,
    existing: Option<&Employee>,
) -> AppResult<EmployeeRecord> {
    if let Some(Some(department_id)) = input.department
        && department::find_by_id(pool, department_id).await?.is_none()
    {
        return Err(AppError::field("department", OBJECT_MISSING));
    }

    let base = existing.map(EmployeeRecord::from).unwrap_or_default();
    Ok(EmployeeRecord {
        name: input.name.unwrap_or(base.name),
        email: input.email.unwrap_or(base.email),
        position: input.position.unwrap_or(base.position),
        department_id: input.department.unwrap_or(base.department_id),
    })
}
