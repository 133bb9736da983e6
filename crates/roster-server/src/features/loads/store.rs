//! Insert-or-ignore writes
//!
//! Every table is keyed by `id`; a second write for the same id is dropped by
//! `ON CONFLICT (id) DO NOTHING` so the first row loaded wins.

use sqlx::PgConnection;

use super::coerce::{CoercedRow, DepartmentRow, EmployeeRow, JobRow};

/// Outcome of one insert-or-ignore
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Inserted,
    /// A row with the same id was already present
    Ignored,
}

impl WriteOutcome {
    fn from_rows_affected(rows: u64) -> Self {
        if rows == 0 {
            WriteOutcome::Ignored
        } else {
            WriteOutcome::Inserted
        }
    }
}

pub async fn insert_employee(
    conn: &mut PgConnection,
    row: &EmployeeRow,
) -> Result<WriteOutcome, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO hired_employees (id, name, hired_at, department_id, job_id)
        VALUES ($1, $2, $3::timestamp, $4, $5)
        ON CONFLICT (id) DO NOTHING
        "#,
    )
    .bind(row.id)
    .bind(row.name.as_deref())
    .bind(row.hired_at.as_deref())
    .bind(row.department_id)
    .bind(row.job_id)
    .execute(&mut *conn)
    .await?;

    Ok(WriteOutcome::from_rows_affected(result.rows_affected()))
}

async fn insert_department(
    conn: &mut PgConnection,
    row: &DepartmentRow,
) -> Result<WriteOutcome, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO departments (id, name) VALUES ($1, $2) ON CONFLICT (id) DO NOTHING",
    )
    .bind(row.id)
    .bind(row.name.as_deref())
    .execute(&mut *conn)
    .await?;

    Ok(WriteOutcome::from_rows_affected(result.rows_affected()))
}

async fn insert_job(conn: &mut PgConnection, row: &JobRow) -> Result<WriteOutcome, sqlx::Error> {
    let result =
        sqlx::query("INSERT INTO jobs (id, title) VALUES ($1, $2) ON CONFLICT (id) DO NOTHING")
            .bind(row.id)
            .bind(row.title.as_deref())
            .execute(&mut *conn)
            .await?;

    Ok(WriteOutcome::from_rows_affected(result.rows_affected()))
}

/// Write a coerced row into its table
pub async fn insert_or_ignore(
    conn: &mut PgConnection,
    row: &CoercedRow,
) -> Result<WriteOutcome, sqlx::Error> {
    match row {
        CoercedRow::Employee(employee) => insert_employee(conn, employee).await,
        CoercedRow::Department(department) => insert_department(conn, department).await,
        CoercedRow::Job(job) => insert_job(conn, job).await,
    }
}
