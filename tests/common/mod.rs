#![allow(dead_code)]

use asset_inventory::{app, ensure_schema, AppConfig, AppState, EntityRegistry};
use axum::body::Body;
use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tower::ServiceExt;

/// Fresh in-memory database with the schema applied. One connection so every query sees the same database.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    ensure_schema(&pool, &EntityRegistry::default()).await.unwrap();
    pool
}

/// Defaults for everything (secret `defaultsecret`, port 5000).
pub fn test_config() -> AppConfig {
    AppConfig::from_lookup(|_| None).unwrap()
}

pub fn build_test_app(pool: SqlitePool) -> Router {
    app(AppState::new(pool, test_config(), EntityRegistry::default()))
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_json(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header(ACCEPT, "application/json")
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_form(app: Router, uri: &str, fields: &[(&str, &str)]) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(serde_urlencoded::to_string(fields).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_string(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn location(response: &Response) -> String {
    response
        .headers()
        .get("location")
        .expect("redirect must carry a location")
        .to_str()
        .unwrap()
        .to_string()
}

/// Make every `event` (INSERT, UPDATE or DELETE) on `table` fail inside its own statement.
pub async fn reject_writes(pool: &SqlitePool, event: &str, table: &str) {
    let ddl = format!(
        "CREATE TRIGGER reject_{event}_{table} AFTER {event} ON {table} BEGIN SELECT RAISE(ABORT, 'rejected'); END"
    );
    sqlx::query(&ddl).execute(pool).await.unwrap();
}
