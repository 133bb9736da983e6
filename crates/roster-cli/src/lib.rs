//! Roster CLI Library
//!
//! Offline checks for the CSV files the Roster server loads. Nothing here
//! touches the database: the validator reads a file and reports the rows the
//! server would skip or store incompletely.
//!
//! - **Single table**: `roster validate jobs`
//! - **Every table**: `roster validate-all --data-dir ./data`

pub mod commands;
pub mod error;
pub mod validate;

pub use error::{CliError, Result};
pub use validate::{ValidationReport, Validator};

use clap::{Parser, Subcommand};
use roster_common::EntityKind;
use std::path::PathBuf;

/// Roster - hiring data loader tools
#[derive(Parser, Debug)]
#[command(name = "roster")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding hired_employees.csv, departments.csv and jobs.csv
    #[arg(long, env = "ROSTER_DATA_DIR", default_value = "data", global = true)]
    pub data_dir: PathBuf,

    /// Print reports as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate one table's CSV file
    Validate {
        /// Table name: hired_employees, departments or jobs
        table: EntityKind,

        /// CSV file to check (defaults to <data-dir>/<table>.csv)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Validate the CSV files of all three tables
    ValidateAll,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_validate() {
        let cli = Cli::try_parse_from(["roster", "validate", "jobs", "--file", "/tmp/jobs.csv"])
            .unwrap();
        match cli.command {
            Commands::Validate { table, file } => {
                assert_eq!(table, EntityKind::Jobs);
                assert_eq!(file, Some(PathBuf::from("/tmp/jobs.csv")));
            },
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_table() {
        assert!(Cli::try_parse_from(["roster", "validate", "payroll"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["roster", "validate-all", "--json", "--data-dir", "fixtures"])
                .unwrap();
        assert!(cli.json);
        assert_eq!(cli.data_dir, PathBuf::from("fixtures"));
        assert!(matches!(cli.command, Commands::ValidateAll));
    }
}
