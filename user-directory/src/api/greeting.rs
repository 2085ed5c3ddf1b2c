//! Root greeting endpoint.

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(greeting).options(greeting))
}

/// GET / - Liveness greeting.
async fn greeting() -> Json<Value> {
    Json(json!({ "hello": "world" }))
}
