//! Load routes
//!
//! - `POST /load-csv/:table` - Load `{data_dir}/{table}.csv`
//! - `POST /insert-batch` - Insert up to 1000 employee records
//!
//! Both answer `200 OK` with `{"message": ...}` even when some rows were
//! skipped; the skipped rows are listed in the message.

use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use roster_common::EntityKind;
use serde_json::Value;

use super::commands::{
    insert_batch, load_csv, InsertBatchCommand, InsertBatchError, LoadCsvCommand, LoadCsvError,
};
use crate::{
    api::response::MessageResponse,
    error::{AppError, AppResult},
    features::FeatureState,
};

/// Create load routes
pub fn loads_routes() -> Router<FeatureState> {
    Router::new()
        .route("/load-csv/:table", post(load_csv_file))
        .route("/insert-batch", post(insert_batch_records))
}

/// Load one table from its server-side CSV file
///
/// # Response
///
/// - `200 OK` - Load committed, possibly with skipped rows
/// - `400 Bad Request` - Unknown table name
/// - `500 Internal Server Error` - Connection, I/O or database failure; nothing committed
#[tracing::instrument(skip_all, fields(table = %table))]
async fn load_csv_file(
    State(state): State<FeatureState>,
    Path(table): Path<String>,
) -> AppResult<MessageResponse> {
    let kind: EntityKind = table.parse()?;
    let command = LoadCsvCommand::from_data_dir(kind, &state.data_dir);
    let message_command = command.clone();

    let summary = load_csv::handle(state.db, command).await?;

    Ok(MessageResponse::new(message_command.message(&summary)))
}

/// Insert a batch of employee records
///
/// # Request Body
///
/// ```json
/// [
///   { "id": 5001, "name": "Jane Doe", "datetime": "2021-08-01T10:00:00Z",
///     "department_id": 1, "job_id": 1 }
/// ]
/// ```
///
/// # Response
///
/// - `200 OK` - Batch committed, possibly with skipped records
/// - `400 Bad Request` - More than 1000 records
/// - `500 Internal Server Error` - Connection or database failure; nothing committed
#[tracing::instrument(skip_all, fields(count = records.len()))]
async fn insert_batch_records(
    State(state): State<FeatureState>,
    Json(records): Json<Vec<Value>>,
) -> AppResult<MessageResponse> {
    let summary = insert_batch::handle(state.db, InsertBatchCommand { records }).await?;

    Ok(MessageResponse::new(InsertBatchCommand::message(&summary)))
}

// ============================================================================
// Error Handling
// ============================================================================

impl From<LoadCsvError> for AppError {
    fn from(err: LoadCsvError) -> Self {
        match err {
            LoadCsvError::Database(e) => AppError::from_sqlx(e),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<InsertBatchError> for AppError {
    fn from(err: InsertBatchError) -> Self {
        match err {
            InsertBatchError::TooManyRecords(_) => AppError::Validation(err.to_string()),
            InsertBatchError::Database(e) => AppError::from_sqlx(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_too_many_records_is_bad_request() {
        let err: AppError = InsertBatchError::TooManyRecords(1001).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_missing_file_is_server_error() {
        let err: AppError = LoadCsvError::Io {
            path: "data/jobs.csv".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        }
        .into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("data/jobs.csv"));
    }

    #[test]
    fn test_pool_timeout_during_load() {
        let err: AppError = LoadCsvError::Database(sqlx::Error::PoolTimedOut).into();
        assert!(matches!(err, AppError::ConnectionUnavailable(_)));
    }
}
