//! # Vitals
//!
//! A liveness/readiness aggregation engine: a registry of independently
//! pluggable health probes, each producing a status, description, timing,
//! and structured diagnostic data, combined into a single report with a
//! worst-status-wins policy.
//!
//! ## Features
//!
//! - **Pluggable probes**: implement one async trait, register a factory
//! - **Failure isolation**: a probe that errors, panics, or times out
//!   becomes an Unhealthy entry; the other probes still run
//! - **Cooperative cancellation**: a shared token aborts the whole run
//!   with no partial report
//! - **Worst-status-wins**: the aggregate status is the maximum severity
//!   across all entries
//! - **Idempotent wiring**: independent modules register probes into one
//!   shared configuration during startup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//! use vitals::{CheckContext, CheckResult, HealthService, Registration, health_checks};
//!
//! struct PingCheck;
//!
//! #[async_trait::async_trait]
//! impl vitals::HealthCheck for PingCheck {
//!     async fn check_health(
//!         &self,
//!         _context: &CheckContext,
//!         _cancel: &CancellationToken,
//!     ) -> vitals::Result<CheckResult> {
//!         Ok(CheckResult::healthy().with_data("round_trip_ms", 3))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> vitals::Result<()> {
//!     health_checks()
//!         .add(Registration::new("ping", |_| Arc::new(PingCheck)).with_tags(["network"]))?;
//!
//!     let service = HealthService::shared()?;
//!     let report = service.check_health(&CancellationToken::new()).await?;
//!     println!("aggregate status: {}", report.status);
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

// Public module exports
pub mod config;
pub mod engine;
pub mod probe;
pub mod registry;
pub mod report;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use engine::HealthService;
pub use probe::{CheckContext, CheckResult, HealthCheck, RunScope};
pub use registry::{
    CheckFactory, HealthChecksBuilder, HealthRegistry, Registration, global_registry,
    health_checks,
};
pub use report::{Report, ReportEntry, Status};
pub use utils::error::{HealthError, Result};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
        assert_eq!(NAME, "vitals");
    }
}
