//! Report queries (read operations)

pub mod departments_above_average;
pub mod hires_by_quarter;

pub use departments_above_average::DepartmentHires;
pub use hires_by_quarter::QuarterlyHires;

/// Error type shared by the report queries
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
