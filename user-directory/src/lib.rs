//! User Directory - read-only HTTP API over a document store of user records.

pub mod api;
pub mod codec;
pub mod config;
pub mod error;
pub mod logging;
pub mod query;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};
pub use query::QueryService;
pub use state::AppState;
pub use store::{InMemoryUserStore, MongoUserStore, UserStore};

use std::sync::Arc;

use axum::{middleware, Router};
use tower_http::trace::TraceLayer;

/// Wire a store into the query service using the configured policies.
pub fn build_state(config: Config, store: Arc<dyn UserStore>) -> Arc<AppState> {
    let query = QueryService::new(store)
        .with_timeout(config.store.query_timeout())
        .with_skip_malformed(config.store.skip_malformed);
    Arc::new(AppState::new(config, query))
}

/// Build the full application router.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(api::router())
        .layer(middleware::from_fn(logging::request_logger))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
