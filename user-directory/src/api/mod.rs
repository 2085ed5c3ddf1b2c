//! HTTP API.

pub mod greeting;
pub mod health;
pub mod users;

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

/// Build the API router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(greeting::router())
        .merge(health::router())
        .merge(users::router())
}
