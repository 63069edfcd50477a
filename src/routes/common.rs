//! Operational routes: liveness, store readiness with per-table row counts, build info.

use crate::state::AppState;
use crate::store;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize)]
struct Readiness {
    status: &'static str,
    database: &'static str,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    tables: BTreeMap<&'static str, i64>,
}

#[derive(Serialize)]
struct BuildInfo {
    name: &'static str,
    version: &'static str,
    /// Path segments served by the inventory pages.
    entities: Vec<&'static str>,
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// 200 once every entity table answers a row count; 503 otherwise.
async fn ready(State(state): State<AppState>) -> Response {
    match store::table_counts(&state.pool, &state.registry).await {
        Ok(tables) => Json(Readiness {
            status: "ok",
            database: "ok",
            tables,
        })
        .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            let body = Readiness {
                status: "degraded",
                database: "unavailable",
                tables: BTreeMap::new(),
            };
            (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
        }
    }
}

async fn version(State(state): State<AppState>) -> Json<BuildInfo> {
    Json(BuildInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        entities: state.registry.entities.iter().map(|e| e.path_segment).collect(),
    })
}

pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .with_state(state)
}
