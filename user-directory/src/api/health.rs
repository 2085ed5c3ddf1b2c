//! Health check endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

/// GET /health - Reports whether the document store answers a ping.
async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    let store = state.query.store();
    let database = &state.config.store.database;
    match store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "store": store.backend(),
                "database": database
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unavailable",
                    "store": store.backend(),
                    "database": database,
                    "message": e.to_string()
                })),
            )
        }
    }
}
