//! Probe contract
//!
//! The capability every pluggable health probe implements, the context and
//! result types it works with, and the per-run dependency scope probe
//! factories resolve against.

mod check;
mod scope;

pub use check::{CheckContext, CheckResult, HealthCheck};
pub use scope::RunScope;

pub(crate) use scope::ResourceMap;
