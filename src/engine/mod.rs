//! Execution engine
//!
//! Drives the registered probes sequentially in registration order,
//! isolates per-probe failures, and reduces the outcomes into a single
//! report with a worst-status-wins policy.

mod events;
mod service;

pub use service::HealthService;
