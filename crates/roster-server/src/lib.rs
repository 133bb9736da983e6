//! Roster Server Library
//!
//! HTTP service that loads hiring data from CSV files into PostgreSQL and
//! answers reporting queries about it.
//!
//! # Overview
//!
//! - **Loads**: bulk CSV loads per table and JSON batch inserts of employees,
//!   with per-row problem reporting and idempotent insert-or-ignore writes
//! - **Reports**: 2021 hires per quarter and departments hiring above the mean
//! - **Database**: PostgreSQL through SQLx, pool creation with retry on connect
//! - **Configuration**: environment-based, see [`config::Config::load`]
//!
//! # Architecture
//!
//! Each feature is a vertical slice under [`features`]:
//!
//! - **Commands** (write operations) live in `commands/` and run inside a single
//!   transaction per call
//! - **Queries** (read operations) live in `queries/`
//! - `routes.rs` maps HTTP requests onto them
//!
//! # Example
//!
//! ```no_run
//! use roster_server::{api, config::Config, db};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let pool = db::create_pool(&config.database).await?;
//!     api::serve(config, pool).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod features;
pub mod middleware;

// Re-export commonly used types
pub use error::{AppError, AppResult};
