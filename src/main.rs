//! Vitals server binary
//!
//! Wires logging, configuration, and the probe registry, then serves the
//! health endpoints over HTTP.

use async_trait::async_trait;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use vitals::{
    CheckContext, CheckResult, Config, HealthService, Result, health_checks, server,
};

#[derive(Parser, Debug)]
#[command(name = "vitals-server", version, about = "Health probe aggregation server")]
struct Args {
    /// Path to the YAML configuration file
    #[arg(long, env = "VITALS_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    vitals::utils::logging::init("info");

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::from_file(path).await?,
        None => Config::from_env()?,
    };

    // Probes specific to a deployment are registered here, next to the
    // rest of the wiring. The engine only sees their registrations.
    health_checks().add_check("self", Arc::new(Uptime::new()))?;

    let service = Arc::new(HealthService::with_default_timeout(
        vitals::global_registry(),
        config.default_timeout(),
    )?);

    server::HttpServer::new(config, service).start().await
}

/// Process self-check: always healthy, reports uptime as diagnostic data
#[derive(Debug)]
struct Uptime {
    started: Instant,
}

impl Uptime {
    fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

#[async_trait]
impl vitals::HealthCheck for Uptime {
    async fn check_health(
        &self,
        _context: &CheckContext,
        _cancel: &CancellationToken,
    ) -> Result<CheckResult> {
        Ok(CheckResult::healthy().with_data("uptime_seconds", self.started.elapsed().as_secs()))
    }
}
