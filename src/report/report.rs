//! Aggregate health report

use super::{ReportEntry, Status};
use std::collections::HashMap;
use std::time::Duration;

/// The aggregate result of one execution of all (filtered) probes
///
/// One report is produced per run and never mutated. Callers that need
/// history must snapshot reports externally; the engine keeps none.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Report {
    /// Worst status among all entries; Healthy when there are no entries
    pub status: Status,
    /// Wall-clock moment the report was assembled
    pub generated_at: chrono::DateTime<chrono::Utc>,
    /// Elapsed time for the whole run, including engine overhead
    #[serde(rename = "total_duration_ms", serialize_with = "super::serialize_millis")]
    pub total_duration: Duration,
    /// Per-probe outcomes keyed by registration name
    pub entries: HashMap<String, ReportEntry>,
}

impl Report {
    pub(crate) fn new(entries: HashMap<String, ReportEntry>, total_duration: Duration) -> Self {
        let status = entries
            .values()
            .map(|entry| entry.status)
            .max()
            .unwrap_or(Status::Healthy);

        Self {
            status,
            generated_at: chrono::Utc::now(),
            total_duration,
            entries,
        }
    }

    /// Look up an entry by probe name, ignoring letter case
    pub fn entry(&self, name: &str) -> Option<&ReportEntry> {
        self.entries.get(name).or_else(|| {
            self.entries
                .iter()
                .find(|(key, _)| key.to_lowercase() == name.to_lowercase())
                .map(|(_, entry)| entry)
        })
    }
}
