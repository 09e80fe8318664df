//! Configuration for the health server binary
//!
//! This module handles loading and validation of the server configuration.

use crate::utils::error::{HealthError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Main configuration struct for the health server
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Engine configuration
    #[serde(default)]
    pub health: HealthConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Engine settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthConfig {
    /// Default per-probe timeout in milliseconds; absent leaves probes
    /// bounded only by per-registration timeouts and caller cancellation
    #[serde(default)]
    pub default_timeout_ms: Option<u64>,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| HealthError::config(format!("failed to read config file: {}", e)))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| HealthError::config(format!("failed to parse config: {}", e)))?;

        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables
    ///
    /// Recognizes `VITALS_HOST`, `VITALS_PORT`, and
    /// `VITALS_DEFAULT_TIMEOUT_MS`; unset variables fall back to defaults.
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Config::default();

        if let Ok(host) = std::env::var("VITALS_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("VITALS_PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| HealthError::config(format!("invalid VITALS_PORT: {}", port)))?;
        }
        if let Ok(timeout) = std::env::var("VITALS_DEFAULT_TIMEOUT_MS") {
            config.health.default_timeout_ms = Some(timeout.parse().map_err(|_| {
                HealthError::config(format!("invalid VITALS_DEFAULT_TIMEOUT_MS: {}", timeout))
            })?);
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the loaded configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(HealthError::config("server host must not be empty"));
        }
        if self.server.port == 0 {
            return Err(HealthError::config("server port must not be 0"));
        }
        if self.health.default_timeout_ms == Some(0) {
            return Err(HealthError::config("default timeout must be positive"));
        }
        Ok(())
    }

    /// Default per-probe timeout as a duration
    pub fn default_timeout(&self) -> Option<Duration> {
        self.health.default_timeout_ms.map(Duration::from_millis)
    }
}
