//! Hires per quarter
//!
//! Number of employees hired in each quarter of the report year, per
//! department and job.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::ReportError;

/// One (department, job) pair with its hires split by quarter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct QuarterlyHires {
    pub department: String,
    pub job: String,
    #[serde(rename = "Q1")]
    pub q1: i64,
    #[serde(rename = "Q2")]
    pub q2: i64,
    #[serde(rename = "Q3")]
    pub q3: i64,
    #[serde(rename = "Q4")]
    pub q4: i64,
}

impl QuarterlyHires {
    pub fn total(&self) -> i64 {
        self.q1 + self.q2 + self.q3 + self.q4
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool, year: i32) -> Result<Vec<QuarterlyHires>, ReportError> {
    let rows = sqlx::query_as::<_, QuarterlyHires>(
        r#"
        SELECT
            COALESCE(d.name, 'Unknown') AS department,
            COALESCE(j.title, 'Unknown') AS job,
            COUNT(*) FILTER (WHERE EXTRACT(MONTH FROM e.hired_at) BETWEEN 1 AND 3) AS q1,
            COUNT(*) FILTER (WHERE EXTRACT(MONTH FROM e.hired_at) BETWEEN 4 AND 6) AS q2,
            COUNT(*) FILTER (WHERE EXTRACT(MONTH FROM e.hired_at) BETWEEN 7 AND 9) AS q3,
            COUNT(*) FILTER (WHERE EXTRACT(MONTH FROM e.hired_at) BETWEEN 10 AND 12) AS q4
        FROM hired_employees e
        LEFT JOIN departments d ON e.department_id = d.id
        LEFT JOIN jobs j ON e.job_id = j.id
        WHERE EXTRACT(YEAR FROM e.hired_at) = $1
        GROUP BY d.name, j.title
        ORDER BY 1, 2
        "#,
    )
    .bind(year)
    .fetch_all(&pool)
    .await?;

    tracing::debug!(groups = rows.len(), "Computed quarterly hires");

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_quarter_keys_upper_case() {
        let row = QuarterlyHires {
            department: "Staff".to_string(),
            job: "Recruiter".to_string(),
            q1: 3,
            q2: 0,
            q3: 7,
            q4: 11,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "department": "Staff",
                "job": "Recruiter",
                "Q1": 3,
                "Q2": 0,
                "Q3": 7,
                "Q4": 11
            })
        );
        assert_eq!(row.total(), 21);
    }
}
