//! Feature modules implementing the Roster API
//!
//! # Features
//!
//! - **loads**: CSV loads and batch inserts (commands)
//! - **reports**: hiring aggregates (queries)
//!
//! Each feature module follows the structure:
//! - `commands/` - Write operations
//! - `queries/` - Read operations
//! - `routes.rs` - HTTP route definitions

pub mod loads;
pub mod reports;

use axum::Router;
use sqlx::PgPool;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    /// PostgreSQL connection pool for database operations
    pub db: PgPool,
    /// Directory holding the per-table CSV files
    pub data_dir: Arc<PathBuf>,
}

impl FeatureState {
    pub fn new(db: PgPool, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            db,
            data_dir: Arc::new(data_dir.into()),
        }
    }
}

/// Creates the router with all feature routes mounted at the root
pub fn router(state: FeatureState) -> Router<()> {
    Router::new()
        .merge(loads::loads_routes().with_state(state.clone()))
        .merge(reports::reports_routes().with_state(state.db))
}
