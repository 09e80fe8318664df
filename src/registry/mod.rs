//! Probe registry and builder
//!
//! Registrations are wired once during process startup and read concurrently
//! by any number of runs afterwards. The registry is append-only; there is
//! no removal operation.

mod builder;
mod registration;

pub use builder::{HealthChecksBuilder, HealthRegistry, global_registry, health_checks};
pub use registration::{CheckFactory, Registration};
