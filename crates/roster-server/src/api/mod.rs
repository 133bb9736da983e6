//! HTTP surface: router assembly, health check and the serve loop

pub mod response;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};
use sqlx::PgPool;
use std::{
    future::{Future, IntoFuture},
    net::SocketAddr,
    sync::Arc,
    time::Duration,
};
use tokio::{signal, sync::Notify};
use tower_http::compression::CompressionLayer;

use crate::{
    config::{Config, CorsConfig},
    db,
    features::{self, FeatureState},
    middleware,
};

/// Build the full application router with middleware
pub fn create_router(state: FeatureState, cors: &CorsConfig) -> Router {
    Router::new()
        .route("/health", get(health_check).with_state(state.db.clone()))
        .merge(features::router(state))
        // Apply layers from innermost to outermost
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(cors))
}

/// Bind and serve until Ctrl+C or SIGTERM
pub async fn serve(config: Config, pool: PgPool) -> anyhow::Result<()> {
    let state = FeatureState::new(pool, config.data.data_dir.clone());
    let app = create_router(state, &config.cors);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, data_dir = %config.data.data_dir.display(), "Server listening");

    let stop = Arc::new(Notify::new());
    let server = axum::serve(listener, app)
        .with_graceful_shutdown({
            let stop = stop.clone();
            async move { stop.notified().await }
        })
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => result?,
        () = shutdown_signal() => {
            stop.notify_one();
            let timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
            drain(server, timeout).await?;
        },
    }

    tracing::info!("Server shut down");
    Ok(())
}

/// Let in-flight requests finish, giving up after `timeout`
///
/// Returns whether every connection closed in time.
async fn drain<F>(server: F, timeout: Duration) -> std::io::Result<bool>
where
    F: Future<Output = std::io::Result<()>>,
{
    tracing::info!(timeout_secs = timeout.as_secs(), "Draining open connections");
    match tokio::time::timeout(timeout, server).await {
        Ok(result) => result.map(|()| true),
        Err(_) => {
            tracing::warn!(
                timeout_secs = timeout.as_secs(),
                "Connections still open after shutdown timeout, closing them"
            );
            Ok(false)
        },
    }
}

/// Health check handler
async fn health_check(State(pool): State<PgPool>) -> (StatusCode, Json<Value>) {
    match db::health_check(&pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "healthy", "database": "connected" })),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Database health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unhealthy", "database": "unreachable" })),
            )
        },
    }
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, starting graceful shutdown"),
        () = terminate => tracing::info!("Received terminate signal, starting graceful shutdown"),
    }
}
