//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::engine::HealthService;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc for efficient sharing across workers.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (shared read-only)
    pub config: Arc<Config>,
    /// Health check execution engine
    pub health: Arc<HealthService>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config, health: Arc<HealthService>) -> Self {
        Self {
            config: Arc::new(config),
            health,
        }
    }
}
