//! Shared application state.

use crate::config::Config;
use crate::query::QueryService;

/// Shared application state passed to all handlers.
pub struct AppState {
    pub config: Config,
    pub query: QueryService,
}

impl AppState {
    pub fn new(config: Config, query: QueryService) -> Self {
        Self { config, query }
    }
}
