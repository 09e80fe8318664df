//! Utility modules
//!
//! - **error**: the crate-wide error type and result alias
//! - **logging**: tracing subscriber initialization
//! - **stopwatch**: monotonic elapsed-time measurement

pub mod error;
pub mod logging;
pub mod stopwatch;

// Re-export commonly used types
pub use error::{HealthError, Result};
pub use stopwatch::Stopwatch;
