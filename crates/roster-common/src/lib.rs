//! Roster Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, logging, and error handling for the Roster workspace.
//!
//! # Overview
//!
//! - **Error Handling**: [`RosterError`] and the [`Result`] alias
//! - **Logging**: tracing subscriber setup shared by the server and the CLI
//! - **Types**: [`EntityKind`], the three loadable tables and their CSV layout
//!
//! # Example
//!
//! ```no_run
//! use roster_common::EntityKind;
//!
//! let kind: EntityKind = "departments".parse()?;
//! assert_eq!(kind.column_count(), 2);
//! # Ok::<(), roster_common::RosterError>(())
//! ```

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{Result, RosterError};
pub use types::EntityKind;
