//! Report data model
//!
//! Types describing the outcome of one health run: the ordered status
//! enumeration, the per-probe entry, and the aggregate report.

mod entry;
mod report;
mod status;

pub use entry::ReportEntry;
pub use report::Report;
pub use status::Status;

use serde::Serializer;
use std::time::Duration;

/// Serialize a duration as fractional milliseconds
pub(crate) fn serialize_millis<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(duration.as_secs_f64() * 1000.0)
}
