//! Appointment Repository
//!
//! Times are stored as epoch milliseconds. Reads return
//! [`AppointmentDetail`] with owner and participants already resolved.

use super::{RepoError, RepoResult, employee};
use shared::error::{ErrorCode, FieldErrors};
use shared::models::{Appointment, AppointmentDetail, AppointmentRecord, EmployeeWithDepartment};
use shared::util::now_millis;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use std::collections::{BTreeSet, HashMap};

const APPOINTMENT_SELECT: &str = "SELECT id, start_at, end_at, title, description, employee_id, created_at, updated_at FROM appointment";

/// Inclusive millisecond window, `(start, end)`
pub type TimeWindow = (i64, i64);

/// List appointments by start time; with a window, only those overlapping it
pub async fn find_all(
    pool: &SqlitePool,
    window: Option<TimeWindow>,
) -> RepoResult<Vec<AppointmentDetail>> {
    let appointments = match window {
        Some((start, end)) => {
            let sql = format!(
                "{APPOINTMENT_SELECT} WHERE start_at <= ?1 AND end_at >= ?2 ORDER BY start_at, id"
            );
            sqlx::query_as::<_, Appointment>(&sql)
                .bind(end)
                .bind(start)
                .fetch_all(pool)
                .await?
        }
        None => {
            let sql = format!("{APPOINTMENT_SELECT} ORDER BY start_at, id");
            sqlx::query_as::<_, Appointment>(&sql).fetch_all(pool).await?
        }
    };
    load_details(pool, appointments).await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<AppointmentDetail>> {
    let sql = format!("{APPOINTMENT_SELECT} WHERE id = ?");
    let appointment = sqlx::query_as::<_, Appointment>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    first_detail(pool, appointment).await
}

/// Earliest-starting appointment that has not ended at `now`
pub async fn find_closest(pool: &SqlitePool, now: i64) -> RepoResult<Option<AppointmentDetail>> {
    let sql = format!("{APPOINTMENT_SELECT} WHERE end_at >= ? ORDER BY start_at, id LIMIT 1");
    let appointment = sqlx::query_as::<_, Appointment>(&sql)
        .bind(now)
        .fetch_optional(pool)
        .await?;
    first_detail(pool, appointment).await
}

pub async fn create(pool: &SqlitePool, record: AppointmentRecord) -> RepoResult<i64> {
    let mut tx = pool.begin().await?;
    validate(&mut tx, &record).await?;

    let now = now_millis();
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO appointment (start_at, end_at, title, description, employee_id, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6) RETURNING id",
    )
    .bind(record.start_datetime.timestamp_millis())
    .bind(record.end_datetime.timestamp_millis())
    .bind(&record.title)
    .bind(&record.description)
    .bind(record.employee_id)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    replace_participants(&mut tx, id, &record.participant_ids).await?;

    tx.commit().await?;
    tracing::info!(appointment_id = id, title = %record.title, "Appointment created");
    Ok(id)
}

pub async fn update(pool: &SqlitePool, id: i64, record: AppointmentRecord) -> RepoResult<()> {
    let mut tx = pool.begin().await?;
    validate(&mut tx, &record).await?;

    let rows = sqlx::query(
        "UPDATE appointment SET start_at = ?1, end_at = ?2, title = ?3, description = ?4, employee_id = ?5, updated_at = ?6 WHERE id = ?7",
    )
    .bind(record.start_datetime.timestamp_millis())
    .bind(record.end_datetime.timestamp_millis())
    .bind(&record.title)
    .bind(&record.description)
    .bind(record.employee_id)
    .bind(now_millis())
    .bind(id)
    .execute(&mut *tx)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(ErrorCode::AppointmentNotFound));
    }

    replace_participants(&mut tx, id, &record.participant_ids).await?;

    tx.commit().await?;
    tracing::info!(appointment_id = id, "Appointment updated");
    Ok(())
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM appointment WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(ErrorCode::AppointmentNotFound));
    }
    tracing::info!(appointment_id = id, "Appointment deleted");
    Ok(())
}

async fn validate(conn: &mut SqliteConnection, record: &AppointmentRecord) -> RepoResult<()> {
    let mut errors = FieldErrors::new();
    if let Err(e) = record.clean() {
        errors.merge(e);
    }

    if let Some(employee_id) = record.employee_id
        && employee::find_employee(&mut *conn, employee_id)
            .await?
            .is_none()
    {
        errors.add("employee", super::object_missing(employee_id));
    }
    for participant_id in &record.participant_ids {
        if employee::find_employee(&mut *conn, *participant_id)
            .await?
            .is_none()
        {
            errors.add("participants", super::object_missing(*participant_id));
        }
    }

    errors.into_result().map_err(RepoError::from)
}

async fn replace_participants(
    conn: &mut SqliteConnection,
    appointment_id: i64,
    participant_ids: &[i64],
) -> RepoResult<()> {
    sqlx::query("DELETE FROM appointment_participant WHERE appointment_id = ?")
        .bind(appointment_id)
        .execute(&mut *conn)
        .await?;

    let unique: BTreeSet<i64> = participant_ids.iter().copied().collect();
    if unique.is_empty() {
        return Ok(());
    }

    let mut builder = QueryBuilder::<Sqlite>::new(
        "INSERT INTO appointment_participant (appointment_id, employee_id) ",
    );
    builder.push_values(unique, |mut row, employee_id| {
        row.push_bind(appointment_id).push_bind(employee_id);
    });
    builder.build().execute(&mut *conn).await?;
    Ok(())
}

async fn first_detail(
    pool: &SqlitePool,
    appointment: Option<Appointment>,
) -> RepoResult<Option<AppointmentDetail>> {
    let Some(appointment) = appointment else {
        return Ok(None);
    };
    Ok(load_details(pool, vec![appointment]).await?.into_iter().next())
}

/// Resolve owners and participants for a page of appointments in two queries
async fn load_details(
    pool: &SqlitePool,
    appointments: Vec<Appointment>,
) -> RepoResult<Vec<AppointmentDetail>> {
    if appointments.is_empty() {
        return Ok(Vec::new());
    }

    let mut builder = QueryBuilder::<Sqlite>::new(
        "SELECT appointment_id, employee_id FROM appointment_participant WHERE appointment_id IN (",
    );
    let mut separated = builder.separated(", ");
    for appointment in &appointments {
        separated.push_bind(appointment.id);
    }
    separated.push_unseparated(") ORDER BY employee_id");
    let links: Vec<(i64, i64)> = builder.build_query_as().fetch_all(pool).await?;

    let employee_ids: BTreeSet<i64> = appointments
        .iter()
        .filter_map(|a| a.employee_id)
        .chain(links.iter().map(|(_, employee_id)| *employee_id))
        .collect();
    let ids: Vec<i64> = employee_ids.into_iter().collect();
    let employees: HashMap<i64, EmployeeWithDepartment> = employee::find_by_ids(pool, &ids)
        .await?
        .into_iter()
        .map(|e| (e.id, e))
        .collect();

    let mut participants: HashMap<i64, Vec<EmployeeWithDepartment>> = HashMap::new();
    for (appointment_id, employee_id) in links {
        if let Some(employee) = employees.get(&employee_id) {
            participants
                .entry(appointment_id)
                .or_default()
                .push(employee.clone());
        }
    }

    Ok(appointments
        .into_iter()
        .map(|appointment| AppointmentDetail {
            employee: appointment
                .employee_id
                .and_then(|id| employees.get(&id).cloned()),
            participants: participants.remove(&appointment.id).unwrap_or_default(),
            appointment,
        })
        .collect())
}
