//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use shared::models::EmployeeFilter;

use super::view::{self, EmployeeView, employee_view};
use crate::api::parse_id;
use crate::core::ServerState;
use crate::db::repository::employee;
use crate::utils::{AppError, AppResult, ErrorCode, JsonBody, Links, WriteMode};

const NOT_FOUND: ErrorCode = ErrorCode::EmployeeNotFound;

/// GET /employees/ - 获取员工列表
pub async fn list(
    State(state): State<ServerState>,
    links: Links,
    Query(filter): Query<EmployeeFilter>,
) -> AppResult<Json<Vec<EmployeeView>>> {
    let employees = employee::find_all(&state.pool, &filter).await?;
    Ok(Json(
        employees.iter().map(|e| employee_view(&links, e)).collect(),
    ))
}

/// GET /employees/{id}/ - 获取单个员工
pub async fn get_by_id(
    State(state): State<ServerState>,
    links: Links,
    Path(id): Path<String>,
) -> AppResult<Json<EmployeeView>> {
    let id = parse_id(&id, NOT_FOUND)?;
    render(&state, &links, id).await.map(Json)
}

/// POST /employees/ - 创建员工
pub async fn create(
    State(state): State<ServerState>,
    links: Links,
    JsonBody(body): JsonBody,
) -> AppResult<(StatusCode, Json<EmployeeView>)> {
    let input = view::parse(&body, WriteMode::Create, &links)?;
    let record = view::to_record(&state.pool, input, None).await?;
    let id = employee::create(&state.pool, record).await?;
    let created = render(&state, &links, id).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /employees/{id}/ - 更新员工
pub async fn update(
    State(state): State<ServerState>,
    links: Links,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> AppResult<Json<EmployeeView>> {
    save(&state, &links, &id, &body, WriteMode::Replace).await.map(Json)
}

/// PATCH /employees/{id}/ - 部分更新员工
pub async fn partial_update(
    State(state): State<ServerState>,
    links: Links,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> AppResult<Json<EmployeeView>> {
    save(&state, &links, &id, &body, WriteMode::Partial).await.map(Json)
}

/// DELETE /employees/{id}/ - 删除员工
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_id(&id, NOT_FOUND)?;
    employee::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn save(
    state: &ServerState,
    links: &Links,
    id: &str,
    body: &serde_json::Value,
    mode: WriteMode,
) -> AppResult<EmployeeView> {
    let id = parse_id(id, NOT_FOUND)?;
    let existing = employee::find_employee(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(NOT_FOUND))?;

    let input = view::parse(body, mode, links)?;
    let record = view::to_record(&state.pool, input, Some(&existing)).await?;
    employee::update(&state.pool, id, record).await?;
    render(state, links, id).await
}

async fn render(state: &ServerState, links: &Links, id: i64) -> AppResult<EmployeeView> {
    let row = employee::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(NOT_FOUND))?;
    Ok(employee_view(links, &row))
}
