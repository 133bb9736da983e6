//! Error types for the Roster CLI
//!
//! Messages are shown to users as-is, so they say what to check next.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    /// Input file is missing
    #[error("File not found: '{0}'. Check --file or --data-dir (ROSTER_DATA_DIR).")]
    FileNotFound(String),

    /// CSV could not be read at all
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: roster_common::RosterError,
    },

    #[error(transparent)]
    Common(#[from] roster_common::RosterError),
}
