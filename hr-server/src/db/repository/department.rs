//! Department Repository
//!
//! Saving a department with a manager also enrolls that manager into the
//! department, in the same transaction as the department write. Clearing
//! the manager later leaves the employee's department untouched.

use super::{RepoError, RepoResult, employee};
use shared::error::{ErrorCode, FieldErrors};
use shared::models::{Department, DepartmentRecord, Employee, EmployeeRecord};
use sqlx::{SqliteConnection, SqliteExecutor, SqlitePool};

pub const NAME_TAKEN: &str = "department with this name already exists.";
pub const MANAGER_TAKEN: &str = "department with this manager already exists.";

const DEPARTMENT_SELECT: &str = "SELECT id, name, manager_id, description FROM department";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Department>> {
    let sql = format!("{DEPARTMENT_SELECT} ORDER BY id");
    let departments = sqlx::query_as::<_, Department>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(departments)
}

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> RepoResult<Option<Department>>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!("{DEPARTMENT_SELECT} WHERE id = ?");
    let department = sqlx::query_as::<_, Department>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(department)
}

pub async fn name_taken<'e, E>(executor: E, name: &str, exclude_id: Option<i64>) -> RepoResult<bool>
where
    E: SqliteExecutor<'e>,
{
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM department WHERE name = ?1 AND (?2 IS NULL OR id <> ?2)",
    )
    .bind(name)
    .bind(exclude_id)
    .fetch_one(executor)
    .await?;
    Ok(count > 0)
}

pub async fn manager_taken<'e, E>(
    executor: E,
    manager_id: i64,
    exclude_id: Option<i64>,
) -> RepoResult<bool>
where
    E: SqliteExecutor<'e>,
{
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM department WHERE manager_id = ?1 AND (?2 IS NULL OR id <> ?2)",
    )
    .bind(manager_id)
    .bind(exclude_id)
    .fetch_one(executor)
    .await?;
    Ok(count > 0)
}

pub async fn create(pool: &SqlitePool, record: DepartmentRecord) -> RepoResult<i64> {
    let mut tx = pool.begin().await?;
    let manager = validate(&mut tx, &record, None).await?;

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO department (name, manager_id, description) VALUES (?1, ?2, ?3) RETURNING id",
    )
    .bind(&record.name)
    .bind(record.manager_id)
    .bind(&record.description)
    .fetch_one(&mut *tx)
    .await?;

    if let Some(manager) = &manager {
        assign_manager(&mut tx, id, manager).await?;
    }

    tx.commit().await?;
    tracing::info!(department_id = id, name = %record.name, "Department created");
    Ok(id)
}

pub async fn update(pool: &SqlitePool, id: i64, record: DepartmentRecord) -> RepoResult<()> {
    let mut tx = pool.begin().await?;
    let manager = validate(&mut tx, &record, Some(id)).await?;

    let rows = sqlx::query(
        "UPDATE department SET name = ?1, manager_id = ?2, description = ?3 WHERE id = ?4",
    )
    .bind(&record.name)
    .bind(record.manager_id)
    .bind(&record.description)
    .bind(id)
    .execute(&mut *tx)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(ErrorCode::DepartmentNotFound));
    }

    if let Some(manager) = &manager {
        assign_manager(&mut tx, id, manager).await?;
    }

    tx.commit().await?;
    tracing::info!(department_id = id, "Department updated");
    Ok(())
}

/// Member employees keep their rows; their department is cleared in storage
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM department WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(ErrorCode::DepartmentNotFound));
    }
    tracing::info!(department_id = id, "Department deleted");
    Ok(())
}

/// Move the manager into the department they manage.
///
/// `manager` is the row resolved by `validate` in the same transaction.
/// The employee is re-validated before the write.
pub async fn assign_manager(
    conn: &mut SqliteConnection,
    department_id: i64,
    manager: &Employee,
) -> RepoResult<()> {
    if manager.department_id == Some(department_id) {
        return Ok(());
    }

    let mut record = EmployeeRecord::from(manager);
    record.department_id = Some(department_id);
    record.clean()?;
    employee::update_in(conn, manager.id, &record).await?;

    tracing::debug!(department_id, employee_id = manager.id, "Manager enrolled into department");
    Ok(())
}

/// Returns the resolved manager, handed on to [`assign_manager`]
async fn validate(
    conn: &mut SqliteConnection,
    record: &DepartmentRecord,
    exclude_id: Option<i64>,
) -> RepoResult<Option<Employee>> {
    let mut errors = FieldErrors::new();
    if name_taken(&mut *conn, &record.name, exclude_id).await? {
        errors.add("name", NAME_TAKEN);
    }

    let mut manager = None;
    if let Some(manager_id) = record.manager_id {
        manager = employee::find_employee(&mut *conn, manager_id).await?;
        if manager.is_none() {
            errors.add("manager", super::object_missing(manager_id));
        } else if manager_taken(&mut *conn, manager_id, exclude_id).await? {
            errors.add("manager", MANAGER_TAKEN);
        }
    }

    if let Err(e) = record.clean(manager.as_ref()) {
        errors.merge(e);
    }
    errors.into_result()?;
    Ok(manager)
}
