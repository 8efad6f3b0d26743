//! Employee Repository

use super::{RepoError, RepoResult};
use shared::error::{ErrorCode, FieldErrors};
use shared::models::{Employee, EmployeeFilter, EmployeeRecord, EmployeeWithDepartment};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqliteExecutor, SqlitePool};

pub const EMAIL_TAKEN: &str = "employee with this email already exists.";

const EMPLOYEE_SELECT: &str =
    "SELECT id, name, email, position, department_id FROM employee";

const EMPLOYEE_WITH_DEPARTMENT_SELECT: &str = "SELECT e.id, e.name, e.email, e.position, e.department_id, d.name AS department_name, d.manager_id AS department_manager_id, d.description AS department_description FROM employee e LEFT JOIN department d ON d.id = e.department_id";

/// List employees, narrowed by case-insensitive substring filters
///
/// SQLite `lower()` only folds ASCII, so matching runs on the fetched rows.
pub async fn find_all(
    pool: &SqlitePool,
    filter: &EmployeeFilter,
) -> RepoResult<Vec<EmployeeWithDepartment>> {
    let name = fold_needle(filter.name.as_deref());
    let email = fold_needle(filter.email.as_deref());
    let sql = format!("{EMPLOYEE_WITH_DEPARTMENT_SELECT} ORDER BY e.id");
    let employees = sqlx::query_as::<_, EmployeeWithDepartment>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(employees
        .into_iter()
        .filter(|e| contains_folded(&e.name, name.as_deref()))
        .filter(|e| contains_folded(&e.email, email.as_deref()))
        .collect())
}

fn fold_needle(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(str::to_lowercase)
}

fn contains_folded(haystack: &str, needle: Option<&str>) -> bool {
    needle.is_none_or(|n| haystack.to_lowercase().contains(n))
}

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> RepoResult<Option<EmployeeWithDepartment>>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!("{EMPLOYEE_WITH_DEPARTMENT_SELECT} WHERE e.id = ?");
    let employee = sqlx::query_as::<_, EmployeeWithDepartment>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(employee)
}

/// Batch lookup, ordered by id; unknown ids are skipped
pub async fn find_by_ids(pool: &SqlitePool, ids: &[i64]) -> RepoResult<Vec<EmployeeWithDepartment>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut builder =
        QueryBuilder::<Sqlite>::new(format!("{EMPLOYEE_WITH_DEPARTMENT_SELECT} WHERE e.id IN ("));
    let mut separated = builder.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(") ORDER BY e.id");
    let employees = builder
        .build_query_as::<EmployeeWithDepartment>()
        .fetch_all(pool)
        .await?;
    Ok(employees)
}

/// Employees whose department reference is `department_id`
pub async fn find_by_department(
    pool: &SqlitePool,
    department_id: i64,
) -> RepoResult<Vec<EmployeeWithDepartment>> {
    let sql = format!("{EMPLOYEE_WITH_DEPARTMENT_SELECT} WHERE e.department_id = ? ORDER BY e.id");
    let employees = sqlx::query_as::<_, EmployeeWithDepartment>(&sql)
        .bind(department_id)
        .fetch_all(pool)
        .await?;
    Ok(employees)
}

/// Plain row without the department join
pub async fn find_employee<'e, E>(executor: E, id: i64) -> RepoResult<Option<Employee>>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!("{EMPLOYEE_SELECT} WHERE id = ?");
    let employee = sqlx::query_as::<_, Employee>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(employee)
}

pub async fn email_taken<'e, E>(executor: E, email: &str, exclude_id: Option<i64>) -> RepoResult<bool>
where
    E: SqliteExecutor<'e>,
{
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM employee WHERE email = ?1 AND (?2 IS NULL OR id <> ?2)",
    )
    .bind(email)
    .bind(exclude_id)
    .fetch_one(executor)
    .await?;
    Ok(count > 0)
}

pub async fn create(pool: &SqlitePool, record: EmployeeRecord) -> RepoResult<i64> {
    let mut tx = pool.begin().await?;
    validate(&mut tx, &record, None).await?;

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO employee (name, email, position, department_id) VALUES (?1, ?2, ?3, ?4) RETURNING id",
    )
    .bind(&record.name)
    .bind(&record.email)
    .bind(record.position)
    .bind(record.department_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    tracing::info!(employee_id = id, email = %record.email, "Employee created");
    Ok(id)
}

pub async fn update(pool: &SqlitePool, id: i64, record: EmployeeRecord) -> RepoResult<()> {
    let mut tx = pool.begin().await?;
    validate(&mut tx, &record, Some(id)).await?;
    update_in(&mut tx, id, &record).await?;
    tx.commit().await?;
    tracing::info!(employee_id = id, "Employee updated");
    Ok(())
}

/// Write an already validated record on an open transaction
pub(crate) async fn update_in(
    conn: &mut SqliteConnection,
    id: i64,
    record: &EmployeeRecord,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE employee SET name = ?1, email = ?2, position = ?3, department_id = ?4 WHERE id = ?5",
    )
    .bind(&record.name)
    .bind(&record.email)
    .bind(record.position)
    .bind(record.department_id)
    .bind(id)
    .execute(&mut *conn)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(ErrorCode::EmployeeNotFound));
    }
    Ok(())
}

/// Department references clear and owned appointments cascade in storage
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM employee WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(ErrorCode::EmployeeNotFound));
    }
    tracing::info!(employee_id = id, "Employee deleted");
    Ok(())
}

async fn validate(
    conn: &mut SqliteConnection,
    record: &EmployeeRecord,
    exclude_id: Option<i64>,
) -> RepoResult<()> {
    let mut errors = FieldErrors::new();
    if let Err(e) = record.clean() {
        errors.merge(e);
    }
    if !errors.contains("email") && email_taken(&mut *conn, &record.email, exclude_id).await? {
        errors.add("email", EMAIL_TAKEN);
    }
    if let Some(department_id) = record.department_id
        && super::department::find_by_id(&mut *conn, department_id)
            .await?
            .is_none()
    {
        errors.add("department", super::object_missing(department_id));
    }
    errors.into_result().map_err(RepoError::from)
}
