//! Report routes
//!
//! - `GET /hires-by-quarter`
//! - `GET /departments-above-average`

use axum::{extract::State, routing::get, Json, Router};
use roster_common::types::REPORT_YEAR;
use sqlx::PgPool;

use super::queries::{
    departments_above_average, hires_by_quarter, DepartmentHires, QuarterlyHires, ReportError,
};
use crate::error::{AppError, AppResult};

/// Create report routes
pub fn reports_routes() -> Router<PgPool> {
    Router::new()
        .route("/hires-by-quarter", get(get_hires_by_quarter))
        .route("/departments-above-average", get(get_departments_above_average))
}

async fn get_hires_by_quarter(
    State(pool): State<PgPool>,
) -> AppResult<Json<Vec<QuarterlyHires>>> {
    let rows = hires_by_quarter::handle(pool, REPORT_YEAR).await?;
    Ok(Json(rows))
}

async fn get_departments_above_average(
    State(pool): State<PgPool>,
) -> AppResult<Json<Vec<DepartmentHires>>> {
    let rows = departments_above_average::handle(pool, REPORT_YEAR).await?;
    Ok(Json(rows))
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Database(e) => AppError::from_sqlx(e),
        }
    }
}
