//! Departments hiring above the mean
//!
//! The mean is taken over per-`department_id` hire counts for the report
//! year, so departments without hires that year do not pull it down.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::ReportError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DepartmentHires {
    /// 0 when the department id does not resolve
    pub id: i32,
    pub department: String,
    pub hired: i64,
}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool, year: i32) -> Result<Vec<DepartmentHires>, ReportError> {
    let rows = sqlx::query_as::<_, DepartmentHires>(
        r#"
        WITH per_department AS (
            SELECT COUNT(*) AS hired
            FROM hired_employees
            WHERE EXTRACT(YEAR FROM hired_at) = $1
            GROUP BY department_id
        )
        SELECT
            COALESCE(d.id, 0) AS id,
            COALESCE(d.name, 'Unknown') AS department,
            COUNT(*) AS hired
        FROM hired_employees e
        LEFT JOIN departments d ON e.department_id = d.id
        WHERE EXTRACT(YEAR FROM e.hired_at) = $1
        GROUP BY d.id, d.name
        HAVING COUNT(*) > (SELECT AVG(hired) FROM per_department)
        ORDER BY hired DESC, id
        "#,
    )
    .bind(year)
    .fetch_all(&pool)
    .await?;

    tracing::debug!(departments = rows.len(), "Computed departments above average");

    Ok(rows)
}
