//! Application state shared across HTTP handlers.

use std::sync::Arc;

use crate::config::Config;
use crate::services::Services;

/// Shared state for the webhook server.
#[derive(Clone)]
pub struct AppState {
    /// External collaborators.
    pub services: Services,
    /// Loaded configuration.
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state.
    pub fn new(services: Services, config: Config) -> Self {
        Self {
            services,
            config: Arc::new(config),
        }
    }
}
