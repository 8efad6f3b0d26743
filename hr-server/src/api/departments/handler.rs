//! Department API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::view::{self, DepartmentView, department_view};
use crate::api::employees::view::{EmployeeView, employee_view};
use crate::api::parse_id;
use crate::core::ServerState;
use crate::db::repository::{department, employee};
use crate::utils::{AppError, AppResult, ErrorCode, JsonBody, Links, WriteMode};

const NOT_FOUND: ErrorCode = ErrorCode::DepartmentNotFound;

/// GET /departments/ - 获取部门列表
pub async fn list(
    State(state): State<ServerState>,
    links: Links,
) -> AppResult<Json<Vec<DepartmentView>>> {
    let departments = department::find_all(&state.pool).await?;
    Ok(Json(
        departments.iter().map(|d| department_view(&links, d)).collect(),
    ))
}

/// GET /departments/{id}/ - 获取单个部门
pub async fn get_by_id(
    State(state): State<ServerState>,
    links: Links,
    Path(id): Path<String>,
) -> AppResult<Json<DepartmentView>> {
    let id = parse_id(&id, NOT_FOUND)?;
    render(&state, &links, id).await.map(Json)
}

/// POST /departments/ - 创建部门
pub async fn create(
    State(state): State<ServerState>,
    links: Links,
    JsonBody(body): JsonBody,
) -> AppResult<(StatusCode, Json<DepartmentView>)> {
    let input = view::parse(&body, WriteMode::Create, &links)?;
    let record = view::to_record(&state.pool, input, None).await?;
    let id = department::create(&state.pool, record).await?;
    let created = render(&state, &links, id).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /departments/{id}/ - 更新部门
pub async fn update(
    State(state): State<ServerState>,
    links: Links,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> AppResult<Json<DepartmentView>> {
    save(&state, &links, &id, &body, WriteMode::Replace).await.map(Json)
}

/// PATCH /departments/{id}/ - 部分更新部门
pub async fn partial_update(
    State(state): State<ServerState>,
    links: Links,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> AppResult<Json<DepartmentView>> {
    save(&state, &links, &id, &body, WriteMode::Partial).await.map(Json)
}

/// DELETE /departments/{id}/ - 删除部门
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_id(&id, NOT_FOUND)?;
    department::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /departments/{id}/employees/ - 获取部门下的员工
pub async fn list_employees(
    State(state): State<ServerState>,
    links: Links,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<EmployeeView>>> {
    let id = parse_id(&id, NOT_FOUND)?;
    if department::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::new(NOT_FOUND));
    }
    let employees = employee::find_by_department(&state.pool, id).await?;
    Ok(Json(
        employees.iter().map(|e| employee_view(&links, e)).collect(),
    ))
}

async fn save(
    state: &ServerState,
    links: &Links,
    id: &str,
    body: &serde_json::Value,
    mode: WriteMode,
) -> AppResult<DepartmentView> {
    let id = parse_id(id, NOT_FOUND)?;
    let existing = department::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(NOT_FOUND))?;

    let input = view::parse(body, mode, links)?;
    let record = view::to_record(&state.pool, input, Some(&existing)).await?;
    department::update(&state.pool, id, record).await?;
    render(state, links, id).await
}

async fn render(state: &ServerState, links: &Links, id: i64) -> AppResult<DepartmentView> {
    let department = department::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(NOT_FOUND))?;
    Ok(department_view(links, &department))
}
