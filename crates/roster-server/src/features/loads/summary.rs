//! Per-call load accounting

use serde::Serialize;
use std::fmt;

use super::store::WriteOutcome;

/// Where a problem came from: a CSV line or a batch record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProblemSource {
    Row,
    Record,
}

impl fmt::Display for ProblemSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProblemSource::Row => f.write_str("Row"),
            ProblemSource::Record => f.write_str("Record"),
        }
    }
}

/// A row or record that was skipped, with the raw input echoed back
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    pub source: ProblemSource,
    /// 1-based position in the file or batch
    pub index: usize,
    pub reason: String,
    pub raw: String,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}: {}", self.source, self.index, self.reason, self.raw)
    }
}

/// Result of a CSV load or a batch insert
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub inserted: u64,
    /// Rows whose id already existed
    pub ignored: u64,
    pub problems: Vec<Problem>,
}

impl LoadSummary {
    pub fn record_write(&mut self, outcome: WriteOutcome) {
        match outcome {
            WriteOutcome::Inserted => self.inserted += 1,
            WriteOutcome::Ignored => self.ignored += 1,
        }
    }

    pub fn record_problem(&mut self, problem: Problem) {
        self.problems.push(problem);
    }

    /// Append duplicate and problem counts to `head`
    ///
    /// `noun` names what the problems are about ("rows" or "records").
    pub fn render(&self, head: impl Into<String>, noun: &str) -> String {
        let mut message = head.into();
        if self.ignored > 0 {
            message.push_str(&format!(", {} duplicates ignored", self.ignored));
        }
        if !self.problems.is_empty() {
            let listed: Vec<String> = self.problems.iter().map(ToString::to_string).collect();
            message.push_str(&format!(
                ", {} {} with problems: [{}]",
                self.problems.len(),
                noun,
                listed.join("; ")
            ));
        }
        message
    }
}
