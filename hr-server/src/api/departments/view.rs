//! Department representations

use serde::Serialize;
use serde_json::Value;
use shared::error::FieldErrors;
use shared::models::{Department, DepartmentRecord};
use sqlx::SqlitePool;

use crate::db::repository::employee;
use crate::utils::validation::{MAX_DEPARTMENT_NAME_LEN, MAX_DESCRIPTION_LEN, OBJECT_MISSING};
use crate::utils::{AppError, AppResult, FieldReader, Links, Resource, TextRule, WriteMode};

#[derive(Debug, Serialize)]
pub struct DepartmentView {
    pub url: String,
    pub id: i64,
    pub name: String,
    /// Hyperlink to the managing employee
    pub manager: Option<String>,
    pub description: String,
}

pub fn department_view(links: &Links, department: &Department) -> DepartmentView {
    DepartmentView {
        url: links.detail(Resource::Department, department.id),
        id: department.id,
        name: department.name.clone(),
        manager: department
            .manager_id
            .map(|id| links.detail(Resource::Employee, id)),
        description: department.description.clone(),
    }
}

#[derive(Debug, Default)]
pub struct DepartmentInput {
    pub name: Option<String>,
    pub manager: Option<Option<i64>>,
    pub description: Option<String>,
}

pub fn parse(body: &Value, mode: WriteMode, links: &Links) -> Result<DepartmentInput, FieldErrors> {
    let mut reader = FieldReader::new(body, mode)?;
    let input = DepartmentInput {
        name: reader.text("name", TextRule::required(MAX_DEPARTMENT_NAME_LEN)),
        manager: reader.hyperlink("manager", false, links, Resource::Employee),
        description: reader.text("description", TextRule::optional(MAX_DESCRIPTION_LEN)),
    };
    reader.finish()?;
    Ok(input)
}

pub async fn to_record(
    pool: &SqlitePool,
    input: DepartmentInput,
    existing: Option<&Department>,
) -> AppResult<DepartmentRecord> {
    if let Some(Some(manager_id)) = input.manager
        && employee::find_employee(pool, manager_id).await?.is_none()
    {
        return Err(AppError::field("manager", OBJECT_MISSING));
    }

    let base = existing.map(DepartmentRecord::from).unwrap_or_default();
    Ok(DepartmentRecord {
        name: input.name.unwrap_or(base.name),
        manager_id: input.manager.unwrap_or(base.manager_id),
        description: input.description.unwrap_or(base.description),
    })
}
