//! Greeting and health check endpoints.

use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(greeting))
        .route("/health", get(health_check))
}

async fn greeting() -> Json<serde_json::Value> {
    Json(json!({ "message": "Hello, you're hitting faithluna" }))
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "faithluna-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
