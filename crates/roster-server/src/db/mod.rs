//! Connection provider
//!
//! Opens the PostgreSQL pool, retrying a bounded number of times while the
//! database comes up.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use thiserror::Error;

use crate::config::DatabaseConfig;

/// Database operation errors with contextual information
#[derive(Error, Debug)]
pub enum DbError {
    /// SQL query or connection error
    #[error("Database query failed: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Every connection attempt failed
    #[error("Database unavailable after {attempts} attempt(s): {source}")]
    Unavailable {
        attempts: u32,
        #[source]
        source: sqlx::Error,
    },
}

pub type DbResult<T> = Result<T, DbError>;

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
}

/// Create the connection pool
///
/// Tries `config.connect_retries` times, sleeping `config.retry_delay_secs`
/// between attempts, and returns [`DbError::Unavailable`] with the last
/// error once attempts run out.
pub async fn create_pool(config: &DatabaseConfig) -> DbResult<PgPool> {
    let attempts = config.connect_retries.max(1);
    let delay = Duration::from_secs(config.retry_delay_secs);
    let mut attempt = 1;

    loop {
        match pool_options(config).connect(&config.url).await {
            Ok(pool) => {
                tracing::info!(
                    attempt,
                    max_connections = config.max_connections,
                    min_connections = config.min_connections,
                    "Database connection pool created"
                );
                return Ok(pool);
            },
            Err(source) if attempt >= attempts => {
                tracing::error!(attempts, error = %source, "Giving up on database connection");
                return Err(DbError::Unavailable { attempts, source });
            },
            Err(e) => {
                tracing::warn!(
                    attempt,
                    attempts,
                    error = %e,
                    "Database connection failed, retrying in {:?}",
                    delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            },
        }
    }
}

pub async fn health_check(pool: &PgPool) -> DbResult<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(DbError::from)
}

/// Whether an error means no connection could be obtained at all
pub fn is_connection_error(error: &sqlx::Error) -> bool {
    matches!(
        error,
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) | sqlx::Error::Tls(_)
    )
}
