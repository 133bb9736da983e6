//! Batch insert of employee records
//!
//! The JSON counterpart of the CSV load: at most [`MAX_BATCH_SIZE`] records
//! per call, one transaction, per-record problems recorded and skipped.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::PgPool;

use crate::features::loads::{
    coerce::coerce_record,
    store::insert_employee,
    summary::{LoadSummary, Problem, ProblemSource},
};

/// Largest batch accepted in one call
pub const MAX_BATCH_SIZE: usize = 1000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertBatchCommand {
    /// Raw records; each should be an object with the five employee keys
    pub records: Vec<Value>,
}

#[derive(Debug, thiserror::Error)]
pub enum InsertBatchError {
    #[error("Cannot insert more than {max} rows at once (got {0})", max = MAX_BATCH_SIZE)]
    TooManyRecords(usize),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl InsertBatchCommand {
    pub fn validate(&self) -> Result<(), InsertBatchError> {
        if self.records.len() > MAX_BATCH_SIZE {
            return Err(InsertBatchError::TooManyRecords(self.records.len()));
        }
        Ok(())
    }

    /// Human-readable summary returned to API callers
    pub fn message(summary: &LoadSummary) -> String {
        summary.render(format!("{} employees inserted", summary.inserted), "records")
    }
}

#[tracing::instrument(skip(pool, command), fields(records = command.records.len()))]
pub async fn handle(
    pool: PgPool,
    command: InsertBatchCommand,
) -> Result<LoadSummary, InsertBatchError> {
    command.validate()?;

    let mut tx = pool.begin().await?;
    let mut summary = LoadSummary::default();

    for (i, record) in command.records.iter().enumerate() {
        let index = i + 1;
        match coerce_record(record) {
            Ok(row) => {
                let outcome = insert_employee(&mut *tx, &row).await?;
                summary.record_write(outcome);
            },
            Err(e) => {
                tracing::debug!(record = index, error = %e, "Skipping batch record");
                summary.record_problem(Problem {
                    source: ProblemSource::Record,
                    index,
                    reason: e.to_string(),
                    raw: record.to_string(),
                });
            },
        }
    }

    tx.commit().await?;

    tracing::info!(
        inserted = summary.inserted,
        ignored = summary.ignored,
        problems = summary.problems.len(),
        "Batch insert committed"
    );

    Ok(summary)
}
