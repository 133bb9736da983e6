//! `roster validate` and `roster validate-all`

use colored::Colorize;
use roster_common::{EntityKind, RosterError};
use serde::Serialize;
use std::path::Path;

use crate::error::{CliError, Result};
use crate::validate::{ValidationReport, Validator};

/// Rows listed per problem before the rest are summarized
const MAX_LISTED_ROWS: usize = 10;

/// Validate one table's file and print the report
pub fn run(table: EntityKind, file: Option<&Path>, data_dir: &Path, json: bool) -> Result<()> {
    let path = file.map_or_else(|| table.default_path(data_dir), Path::to_path_buf);
    let report = check(table, &path)?;

    if json {
        print_json(&report)?;
    } else {
        print_report(&report);
    }
    Ok(())
}

/// Validate every table under `data_dir`
///
/// A missing file fails the command only after the other tables were checked.
pub fn run_all(data_dir: &Path, json: bool) -> Result<()> {
    let mut reports = Vec::new();
    let mut first_error = None;

    for kind in EntityKind::ALL {
        match check(kind, &kind.default_path(data_dir)) {
            Ok(report) => reports.push(report),
            Err(e) => {
                tracing::warn!(table = %kind, error = %e, "Validation failed");
                eprintln!("{} {}", "Error:".red().bold(), e);
                if first_error.is_none() {
                    first_error = Some(e);
                }
            },
        }
    }

    if json {
        print_json(&reports)?;
    } else {
        for report in &reports {
            print_report(report);
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn check(kind: EntityKind, path: &Path) -> Result<ValidationReport> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    Validator::new(kind)
        .validate_file(path)
        .map_err(|source| CliError::Read {
            path: path.display().to_string(),
            source,
        })
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).map_err(RosterError::from)?;
    println!("{out}");
    Ok(())
}

fn print_report(report: &ValidationReport) {
    println!(
        "{} {} ({})",
        "Validation of".cyan().bold(),
        report.table.to_string().bold(),
        report.path.display()
    );
    println!("  Total rows: {}", report.total_rows);
    println!("  Valid rows: {}", report.valid_rows.to_string().green());

    if report.is_clean() {
        println!("  {}", "No problems found".green());
    } else {
        println!("  Problems:");
        for (problem, rows) in &report.problems {
            println!("    {}: {}", problem.yellow(), format_rows(rows));
        }
    }
    println!();
}

/// `rows 1, 2, 3` or `rows 1, 2, ... and 40 more`
fn format_rows(rows: &[usize]) -> String {
    let listed: Vec<String> = rows
        .iter()
        .take(MAX_LISTED_ROWS)
        .map(ToString::to_string)
        .collect();
    let label = if rows.len() == 1 { "row" } else { "rows" };
    let mut out = format!("{} {}", label, listed.join(", "));
    if rows.len() > MAX_LISTED_ROWS {
        out.push_str(&format!(" and {} more", rows.len() - MAX_LISTED_ROWS));
    }
    out
}
