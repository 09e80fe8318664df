//! Structured events emitted around a health run
//!
//! Six events with stable numeric identifiers cover the run lifecycle:
//! run begin/end, probe begin/end, probe unhandled failure, and the
//! diagnostic-data dump. Probe-end severity follows the entry status:
//! Healthy logs at debug, Degraded at warn, Unhealthy at error.

use crate::report::{ReportEntry, Status};
use std::time::Duration;
use tracing::{Level, debug, error, warn};

pub(crate) const RUN_BEGIN: u16 = 100;
pub(crate) const RUN_END: u16 = 101;
pub(crate) const CHECK_BEGIN: u16 = 102;
pub(crate) const CHECK_END: u16 = 103;
pub(crate) const CHECK_ERROR: u16 = 104;
pub(crate) const CHECK_DATA: u16 = 105;

fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

pub(crate) fn run_begin() {
    debug!(event_id = RUN_BEGIN, "Running health checks");
}

pub(crate) fn run_end(status: Status, total: Duration) {
    debug!(
        event_id = RUN_END,
        status = %status,
        elapsed_ms = millis(total),
        "Health check processing completed after {:.2}ms with combined status {}",
        millis(total),
        status,
    );
}

pub(crate) fn check_begin(name: &str) {
    debug!(event_id = CHECK_BEGIN, check = name, "Running health check {}", name);
}

pub(crate) fn check_end(name: &str, entry: &ReportEntry) {
    let elapsed = millis(entry.duration);
    let description = entry.description.as_deref().unwrap_or("");

    match entry.status {
        Status::Healthy => debug!(
            event_id = CHECK_END,
            check = name,
            elapsed_ms = elapsed,
            "Health check {} completed after {:.2}ms with status {} and '{}'",
            name,
            elapsed,
            entry.status,
            description,
        ),
        Status::Degraded => warn!(
            event_id = CHECK_END,
            check = name,
            elapsed_ms = elapsed,
            "Health check {} completed after {:.2}ms with status {} and '{}'",
            name,
            elapsed,
            entry.status,
            description,
        ),
        Status::Unhealthy => error!(
            event_id = CHECK_END,
            check = name,
            elapsed_ms = elapsed,
            "Health check {} completed after {:.2}ms with status {} and '{}'",
            name,
            elapsed,
            entry.status,
            description,
        ),
    }
}

pub(crate) fn check_error(name: &str, failure: &str, duration: Duration) {
    error!(
        event_id = CHECK_ERROR,
        check = name,
        error = failure,
        elapsed_ms = millis(duration),
        "Health check {} raised an unhandled failure after {:.2}ms",
        name,
        millis(duration),
    );
}

/// Diagnostic-data dump, emitted only when the probe returned data and the
/// debug level is enabled; the probe name rides along so the dump can be
/// filtered like the other events.
pub(crate) fn check_data(name: &str, entry: &ReportEntry) {
    if entry.data.is_empty() || !tracing::enabled!(Level::DEBUG) {
        return;
    }

    let data = serde_json::to_string(&entry.data).unwrap_or_default();
    debug!(
        event_id = CHECK_DATA,
        check = name,
        data = %data,
        "Health check data for {}",
        name,
    );
}
