//! Bulk CSV load
//!
//! Streams a header-less CSV file into one table inside a single transaction.
//! Rows are numbered by the file line they start on. Blank lines count as
//! rows with every field empty and are reported as missing their id.
//! Rows that fail coercion are recorded and skipped; anything else (I/O,
//! malformed CSV, database failure) aborts the load and rolls back every row
//! written so far.

use csv_async::{AsyncReaderBuilder, Position, StringRecord, Terminator};
use roster_common::EntityKind;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::io::SeekFrom;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncReadExt, AsyncSeekExt};

use crate::features::loads::{
    coerce::{coerce_row, CoerceError},
    store::{insert_or_ignore, WriteOutcome},
    summary::{LoadSummary, Problem, ProblemSource},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadCsvCommand {
    pub kind: EntityKind,
    pub path: PathBuf,
}

impl LoadCsvCommand {
    /// Command for the table's default file inside `data_dir`
    pub fn from_data_dir(kind: EntityKind, data_dir: &Path) -> Self {
        Self {
            kind,
            path: kind.default_path(data_dir),
        }
    }

    /// Human-readable summary returned to API callers
    pub fn message(&self, summary: &LoadSummary) -> String {
        summary.render(
            format!("Loaded {}: {} rows inserted", self.kind.file_name(), summary.inserted),
            "rows",
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadCsvError {
    #[error("Failed to open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv_async::Error),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// A blank line is a row with every field empty, so its id is missing
fn blank_line_problem(line: u64) -> Problem {
    Problem {
        source: ProblemSource::Row,
        index: line as usize,
        reason: CoerceError::MissingId.to_string(),
        raw: "[]".to_string(),
    }
}

/// Maps records back to the file lines they start on
///
/// The reader skips blank lines without reporting them, so the start line is
/// derived from where the record ended, the line breaks inside its quoted
/// fields and whether a line break terminated it.
#[derive(Debug)]
struct LineTracker {
    /// First line not yet accounted for
    next_line: u64,
    file_len: u64,
    ends_with_newline: bool,
}

impl LineTracker {
    fn new(file_len: u64, ends_with_newline: bool) -> Self {
        Self {
            next_line: 1,
            file_len,
            ends_with_newline,
        }
    }

    /// Blank lines before `record` and the line `record` starts on
    ///
    /// `end` is the reader position right after reading `record`.
    fn advance(&mut self, record: &StringRecord, end: &Position) -> (Range<u64>, u64) {
        let embedded: u64 = record
            .iter()
            .map(|field| field.matches('\n').count() as u64)
            .sum();
        let terminated = end.byte() < self.file_len || self.ends_with_newline;
        let start = end
            .line()
            .saturating_sub(embedded + u64::from(terminated))
            .max(self.next_line);

        let blanks = self.next_line..start;
        self.next_line = if terminated { end.line() } else { end.line() + 1 };
        (blanks, start)
    }

    /// Blank lines after the last record
    fn finish(&self, end: &Position) -> Range<u64> {
        self.next_line..end.line()
    }
}

async fn ends_with_newline(file: &mut tokio::fs::File, len: u64) -> std::io::Result<bool> {
    if len == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1)).await?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last).await?;
    file.rewind().await?;
    Ok(last[0] == b'\n')
}

#[tracing::instrument(skip(pool, command), fields(table = %command.kind, path = %command.path.display()))]
pub async fn handle(pool: PgPool, command: LoadCsvCommand) -> Result<LoadSummary, LoadCsvError> {
    let mut tx = pool.begin().await?;

    let io_error = |source| LoadCsvError::Io {
        path: command.path.clone(),
        source,
    };
    let mut file = tokio::fs::File::open(&command.path).await.map_err(io_error)?;
    let file_len = file.metadata().await.map_err(io_error)?.len();
    let terminated = ends_with_newline(&mut file, file_len)
        .await
        .map_err(io_error)?;

    let mut reader = AsyncReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .terminator(Terminator::Any(b'\n'))
        .create_reader(file);

    let mut summary = LoadSummary::default();
    let mut record = StringRecord::new();
    let mut lines = LineTracker::new(file_len, terminated);
    let mut rows = 0usize;

    while reader.read_record(&mut record).await? {
        let (blanks, line) = lines.advance(&record, reader.position());
        for blank in blanks {
            rows += 1;
            summary.record_problem(blank_line_problem(blank));
        }
        rows += 1;

        let index = line as usize;
        let fields: Vec<&str> = record.iter().collect();

        match coerce_row(command.kind, &fields) {
            Ok(row) => {
                let outcome = insert_or_ignore(&mut *tx, &row).await?;
                if outcome == WriteOutcome::Ignored {
                    tracing::debug!(row = index, id = row.id(), "Duplicate id ignored");
                }
                summary.record_write(outcome);
            },
            Err(e) => {
                tracing::debug!(row = index, error = %e, "Skipping CSV row");
                summary.record_problem(Problem {
                    source: ProblemSource::Row,
                    index,
                    reason: e.to_string(),
                    raw: format!("{:?}", fields),
                });
            },
        }
    }

    for blank in lines.finish(reader.position()) {
        rows += 1;
        summary.record_problem(blank_line_problem(blank));
    }

    tx.commit().await?;

    tracing::info!(
        rows,
        inserted = summary.inserted,
        ignored = summary.ignored,
        problems = summary.problems.len(),
        "CSV load committed"
    );

    Ok(summary)
}
