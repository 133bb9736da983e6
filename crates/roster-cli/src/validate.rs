//! CSV validation
//!
//! Checks every row of a header-less table file for the right number of
//! columns, blank values, integer ids and (for employees) a parseable hire
//! timestamp. Problems are grouped by description so a file with thousands
//! of rows missing the same column reports one line.

use chrono::{DateTime, NaiveDateTime};
use roster_common::EntityKind;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnType {
    Integer,
    Text,
    Timestamp,
}

fn columns(kind: EntityKind) -> &'static [(&'static str, ColumnType)] {
    match kind {
        EntityKind::HiredEmployees => &[
            ("id", ColumnType::Integer),
            ("name", ColumnType::Text),
            ("datetime", ColumnType::Timestamp),
            ("department_id", ColumnType::Integer),
            ("job_id", ColumnType::Integer),
        ],
        EntityKind::Departments => &[("id", ColumnType::Integer), ("department", ColumnType::Text)],
        EntityKind::Jobs => &[("id", ColumnType::Integer), ("job", ColumnType::Text)],
    }
}

/// Timestamp layouts PostgreSQL accepts for the `hired_at` column
fn is_timestamp(value: &str) -> bool {
    DateTime::parse_from_rfc3339(value).is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").is_ok()
}

/// What is wrong with one row
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum RowIssue {
    ColumnCount { expected: usize, found: usize },
    EmptyColumn { column: usize, name: &'static str },
    NotAnInteger { column: usize, name: &'static str },
    InvalidTimestamp { column: usize },
}

impl fmt::Display for RowIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowIssue::ColumnCount { expected, found } => {
                write!(f, "Wrong number of columns (expected {expected}, found {found})")
            },
            RowIssue::EmptyColumn { column, name } => write!(f, "Column {column} ({name}) empty"),
            RowIssue::NotAnInteger { column, name } => {
                write!(f, "Column {column} ({name}) is not an integer")
            },
            RowIssue::InvalidTimestamp { column } => {
                write!(f, "Column {column} (datetime) is not a valid timestamp")
            },
        }
    }
}

/// Outcome of validating one file
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub table: EntityKind,
    pub path: PathBuf,
    pub total_rows: usize,
    /// Rows with the right column count and no other issue
    pub valid_rows: usize,
    /// Issue description to the 1-based rows it affects
    pub problems: BTreeMap<String, Vec<usize>>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn invalid_rows(&self) -> usize {
        self.total_rows - self.valid_rows
    }
}

/// Validates CSV files of one entity kind
#[derive(Debug, Clone, Copy)]
pub struct Validator {
    kind: EntityKind,
}

impl Validator {
    pub fn new(kind: EntityKind) -> Self {
        Self { kind }
    }

    /// Issues found in one row, in column order
    pub fn check_row(&self, fields: &[&str]) -> Vec<RowIssue> {
        let expected = self.kind.column_count();
        if fields.len() != expected {
            return vec![RowIssue::ColumnCount {
                expected,
                found: fields.len(),
            }];
        }

        let layout = columns(self.kind);

        let mut issues = Vec::new();
        for (i, (value, &(name, ty))) in fields.iter().zip(layout).enumerate() {
            let column = i + 1;
            let value = value.trim();
            if value.is_empty() {
                issues.push(RowIssue::EmptyColumn { column, name });
                continue;
            }
            match ty {
                ColumnType::Integer if value.parse::<i32>().is_err() => {
                    issues.push(RowIssue::NotAnInteger { column, name });
                },
                ColumnType::Timestamp if !is_timestamp(value) => {
                    issues.push(RowIssue::InvalidTimestamp { column });
                },
                _ => {},
            }
        }
        issues
    }

    /// Validate CSV data read from `reader`
    ///
    /// `path` is only recorded in the report.
    pub fn validate_reader<R: io::Read>(
        &self,
        reader: R,
        path: impl Into<PathBuf>,
    ) -> roster_common::Result<ValidationReport> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut report = ValidationReport {
            table: self.kind,
            path: path.into(),
            total_rows: 0,
            valid_rows: 0,
            problems: BTreeMap::new(),
        };

        for (i, record) in csv.records().enumerate() {
            let record = record?;
            let row = i + 1;
            let fields: Vec<&str> = record.iter().collect();
            let issues = self.check_row(&fields);

            report.total_rows += 1;
            if issues.is_empty() {
                report.valid_rows += 1;
                continue;
            }
            tracing::trace!(row, issues = issues.len(), "Row has issues");
            for issue in issues {
                report.problems.entry(issue.to_string()).or_default().push(row);
            }
        }

        tracing::debug!(
            table = %self.kind,
            total = report.total_rows,
            valid = report.valid_rows,
            "Validated CSV"
        );

        Ok(report)
    }

    pub fn validate_file(&self, path: &Path) -> roster_common::Result<ValidationReport> {
        let file = std::fs::File::open(path)?;
        self.validate_reader(io::BufReader::new(file), path)
    }
}
