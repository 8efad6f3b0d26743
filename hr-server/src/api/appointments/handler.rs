//! Appointment API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use shared::util::now_millis;

use super::view::{self, AppointmentView, appointment_view};
use crate::api::parse_id;
use crate::core::ServerState;
use crate::db::repository::appointment;
use crate::utils::time::{day_window, parse_date};
use crate::utils::validation::INVALID_DATE;
use crate::utils::{AppError, AppResult, ErrorCode, JsonBody, Links, WriteMode};

const NOT_FOUND: ErrorCode = ErrorCode::AppointmentNotFound;

#[derive(Debug, Default, Deserialize)]
pub struct AppointmentQuery {
    /// YYYY-MM-DD, local to the configured offset
    pub date: Option<String>,
}

/// GET /appointments/ - 获取预约列表
pub async fn list(
    State(state): State<ServerState>,
    links: Links,
    Query(query): Query<AppointmentQuery>,
) -> AppResult<Json<Vec<AppointmentView>>> {
    let window = match query.date.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => {
            let date = parse_date(raw).ok_or_else(|| AppError::field("date", INVALID_DATE))?;
            Some(day_window(date, state.config.utc_offset))
        }
    };

    let appointments = appointment::find_all(&state.pool, window).await?;
    Ok(Json(
        appointments
            .iter()
            .map(|a| appointment_view(&links, a))
            .collect(),
    ))
}

/// GET /appointments/closest/ - 最近一个未结束的预约
pub async fn closest(
    State(state): State<ServerState>,
    links: Links,
) -> AppResult<Json<AppointmentView>> {
    let detail = appointment::find_closest(&state.pool, now_millis())
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::NoFutureAppointments))?;
    Ok(Json(appointment_view(&links, &detail)))
}

/// GET /appointments/{id}/ - 获取单个预约
pub async fn get_by_id(
    State(state): State<ServerState>,
    links: Links,
    Path(id): Path<String>,
) -> AppResult<Json<AppointmentView>> {
    let id = parse_id(&id, NOT_FOUND)?;
    render(&state, &links, id).await.map(Json)
}

/// POST /appointments/ - 创建预约
pub async fn create(
    State(state): State<ServerState>,
    links: Links,
    JsonBody(body): JsonBody,
) -> AppResult<(StatusCode, Json<AppointmentView>)> {
    let input = view::parse(&body, WriteMode::Create, &links, state.config.utc_offset)?;
    let record = view::to_record(&state.pool, input, None).await?;
    let id = appointment::create(&state.pool, record).await?;
    let created = render(&state, &links, id).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /appointments/{id}/ - 更新预约
pub async fn update(
    State(state): State<ServerState>,
    links: Links,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> AppResult<Json<AppointmentView>> {
    save(&state, &links, &id, &body, WriteMode::Replace).await.map(Json)
}

/// PATCH /appointments/{id}/ - 部分更新预约
pub async fn partial_update(
    State(state): State<ServerState>,
    links: Links,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> AppResult<Json<AppointmentView>> {
    save(&state, &links, &id, &body, WriteMode::Partial).await.map(Json)
}

/// DELETE /appointments/{id}/ - 删除预约
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_id(&id, NOT_FOUND)?;
    appointment::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn save(
    state: &ServerState,
    links: &Links,
    id: &str,
    body: &serde_json::Value,
    mode: WriteMode,
) -> AppResult<AppointmentView> {
    let id = parse_id(id, NOT_FOUND)?;
    let existing = appointment::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(NOT_FOUND))?;

    let input = view::parse(body, mode, links, state.config.utc_offset)?;
    let record = view::to_record(&state.pool, input, Some(&existing)).await?;
    appointment::update(&state.pool, id, record).await?;
    render(state, links, id).await
}

async fn render(state: &ServerState, links: &Links, id: i64) -> AppResult<AppointmentView> {
    let detail = appointment::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(NOT_FOUND))?;
    Ok(appointment_view(links, &detail))
}
