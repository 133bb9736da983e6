//! Shared domain types
//!
//! [`EntityKind`] names the three tables the loader knows about. The HTTP path
//! segment, the database table and the default CSV file all use the same name.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::RosterError;

/// Year the hiring reports are computed for.
pub const REPORT_YEAR: i32 = 2021;

/// Keys every employee record in a batch must carry.
pub const EMPLOYEE_RECORD_KEYS: [&str; 5] = ["id", "name", "datetime", "department_id", "job_id"];

/// One of the loadable entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Employees with hire timestamp, department and job references
    HiredEmployees,
    /// Departments (id, name)
    Departments,
    /// Jobs (id, title)
    Jobs,
}

impl EntityKind {
    /// All kinds, in the order a full load should run
    pub const ALL: [EntityKind; 3] = [
        EntityKind::Departments,
        EntityKind::Jobs,
        EntityKind::HiredEmployees,
    ];

    /// Database table name
    pub fn table_name(self) -> &'static str {
        match self {
            EntityKind::HiredEmployees => "hired_employees",
            EntityKind::Departments => "departments",
            EntityKind::Jobs => "jobs",
        }
    }

    /// Number of columns a CSV row of this kind carries
    pub fn column_count(self) -> usize {
        match self {
            EntityKind::HiredEmployees => 5,
            EntityKind::Departments | EntityKind::Jobs => 2,
        }
    }

    /// CSV file name for this kind, e.g. `jobs.csv`
    pub fn file_name(self) -> String {
        format!("{}.csv", self.table_name())
    }

    /// Default location of this kind's CSV file inside `data_dir`
    pub fn default_path(self, data_dir: &Path) -> PathBuf {
        data_dir.join(self.file_name())
    }
}

impl FromStr for EntityKind {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hired_employees" => Ok(EntityKind::HiredEmployees),
            "departments" => Ok(EntityKind::Departments),
            "jobs" => Ok(EntityKind::Jobs),
            other => Err(RosterError::UnknownTable(other.to_string())),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}
