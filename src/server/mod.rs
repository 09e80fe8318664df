//! HTTP server implementation
//!
//! Thin trigger surface over the execution engine: routes that run the
//! probes and map the aggregate status onto transport-level responses. The
//! engine itself is agnostic to this mapping.

pub mod routes;
pub mod state;

pub use state::AppState;

use crate::config::Config;
use crate::engine::HealthService;
use crate::utils::error::Result;
use actix_web::{App, web};
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

/// HTTP server hosting the health endpoints
pub struct HttpServer {
    state: AppState,
}

impl HttpServer {
    /// Create a server over the given configuration and engine
    pub fn new(config: Config, health: Arc<HealthService>) -> Self {
        Self {
            state: AppState::new(config, health),
        }
    }

    /// Bind and run the server until shutdown
    pub async fn start(self) -> Result<()> {
        let host = self.state.config.server.host.clone();
        let port = self.state.config.server.port;
        let state = self.state;

        info!("Starting health server on {}:{}", host, port);

        actix_web::HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(state.clone()))
                .wrap(TracingLogger::default())
                .configure(routes::health::configure_routes)
        })
        .bind((host.as_str(), port))?
        .run()
        .await?;

        Ok(())
    }
}
