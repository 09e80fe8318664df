//! Per-probe report entry

use super::Status;
use std::collections::BTreeMap;
use std::time::Duration;

/// Outcome of a single probe within one run
///
/// Entries are built by the execution engine and handed out inside a
/// [`Report`](super::Report); they are not mutated afterwards.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ReportEntry {
    /// Status the probe reported (or Unhealthy for a captured failure)
    pub status: Status,
    /// Human-readable description, if the probe provided one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Elapsed time for this probe alone
    #[serde(rename = "duration_ms", serialize_with = "super::serialize_millis")]
    pub duration: Duration,
    /// Rendered failure chain, present only when the probe raised an
    /// unexpected failure instead of returning a result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Diagnostic key/value data reported by the probe
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, serde_json::Value>,
}

impl ReportEntry {
    pub(crate) fn new(
        status: Status,
        description: Option<String>,
        duration: Duration,
        error: Option<String>,
        data: BTreeMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            status,
            description,
            duration,
            error,
            data,
        }
    }

    /// Entry for a captured probe failure: always Unhealthy, with the
    /// failure message doubling as the description.
    pub(crate) fn failed(message: String, detail: String, duration: Duration) -> Self {
        Self {
            status: Status::Unhealthy,
            description: Some(message),
            duration,
            error: Some(detail),
            data: BTreeMap::new(),
        }
    }
}
