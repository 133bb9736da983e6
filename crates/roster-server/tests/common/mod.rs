//! Shared helpers for the server integration tests

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use roster_common::EntityKind;
use roster_server::{api, config::Config, features::FeatureState};
use serde_json::Value;
use sqlx::PgPool;
use std::path::Path;
use tempfile::TempDir;
use tower::ServiceExt;

/// Data directory with the given CSV contents per table
pub fn data_dir(files: &[(EntityKind, &str)]) -> TempDir {
    let dir = tempfile::tempdir().expect("create temp data dir");
    for (kind, contents) in files {
        write_csv(dir.path(), *kind, contents);
    }
    dir
}

pub fn write_csv(dir: &Path, kind: EntityKind, contents: &str) {
    std::fs::write(kind.default_path(dir), contents).expect("write CSV fixture");
}

/// Full application router over `pool`, reading CSV files from `dir`
pub fn test_app(pool: PgPool, dir: &Path) -> Router {
    let config = Config::default();
    api::create_router(FeatureState::new(pool, dir), &config.cors)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn post(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .uri(uri)
            .method("POST")
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .uri(uri)
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

pub fn message(body: &Value) -> &str {
    body["message"].as_str().unwrap_or_default()
}

pub async fn count(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}
