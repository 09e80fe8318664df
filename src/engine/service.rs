//! Health check execution engine

use super::events;
use crate::probe::{CheckContext, CheckResult, HealthCheck, RunScope};
use crate::registry::{HealthRegistry, Registration, global_registry};
use crate::report::{Report, ReportEntry};
use crate::utils::error::{HealthError, Result};
use crate::utils::stopwatch::Stopwatch;
use futures::FutureExt;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Runs the registered probes and reduces their outcomes into a [`Report`]
///
/// The engine holds no per-run state: every invocation of
/// [`check_health`](Self::check_health) gets its own scope, stopwatches, and
/// entry map, so overlapping runs from concurrent callers are independent.
/// The registration list is the only shared input and is read-only during a
/// run.
pub struct HealthService {
    registry: Arc<HealthRegistry>,
    default_timeout: Option<Duration>,
}

impl std::fmt::Debug for HealthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthService")
            .field("registrations", &self.registry.len())
            .field("default_timeout", &self.default_timeout)
            .finish()
    }
}

/// What a single guarded probe invocation produced
enum Invocation {
    Completed(Result<CheckResult>),
    Panicked(String),
    TimedOut(Duration),
    Cancelled,
}

impl HealthService {
    /// Build an engine over the given registry
    ///
    /// Fails fast with [`HealthError::DuplicateRegistrations`] when two
    /// registrations share a name under case-insensitive comparison; a
    /// process should refuse to start with ambiguously named probes rather
    /// than report under them.
    pub fn new(registry: Arc<HealthRegistry>) -> Result<Self> {
        Self::with_default_timeout(registry, None)
    }

    /// Build an engine with a default per-probe timeout
    ///
    /// Individual registrations may override the default with
    /// [`Registration::with_timeout`]; `None` leaves probes unbounded.
    pub fn with_default_timeout(
        registry: Arc<HealthRegistry>,
        default_timeout: Option<Duration>,
    ) -> Result<Self> {
        validate_registrations(&registry.snapshot())?;

        Ok(Self {
            registry,
            default_timeout,
        })
    }

    /// The engine over the process-wide registry
    ///
    /// Initialized on first use; every later call returns the same
    /// instance, so composition code can reach the engine from anywhere
    /// without threading a handle through.
    pub fn shared() -> Result<Arc<HealthService>> {
        static SHARED: OnceCell<Arc<HealthService>> = OnceCell::new();

        SHARED
            .get_or_try_init(|| HealthService::new(global_registry()).map(Arc::new))
            .cloned()
    }

    /// Run every registered probe
    pub async fn check_health(&self, cancel: &CancellationToken) -> Result<Report> {
        self.check_health_filtered(|_| true, cancel).await
    }

    /// Run the probes selected by `predicate`, in registration order
    ///
    /// Each probe is isolated: an unexpected failure (error return, panic,
    /// or fired timeout) becomes an Unhealthy entry and the run continues.
    /// Cancellation is the one exception and aborts the run with
    /// [`HealthError::Cancelled`]; no partial report is returned.
    pub async fn check_health_filtered<F>(
        &self,
        predicate: F,
        cancel: &CancellationToken,
    ) -> Result<Report>
    where
        F: Fn(&Registration) -> bool,
    {
        let registrations = self.registry.snapshot();
        let scope = RunScope::new(self.registry.shared_resources());
        let mut entries: HashMap<String, ReportEntry> = HashMap::new();

        let total = Stopwatch::start_new();
        events::run_begin();

        for registration in &registrations {
            if !predicate(registration) {
                continue;
            }

            if cancel.is_cancelled() {
                return Err(HealthError::Cancelled);
            }

            let check = registration.create(&scope);
            let context = CheckContext::new(registration.clone());
            let watch = Stopwatch::start_new();
            events::check_begin(registration.name());

            let entry = match self.invoke(check, &context, registration.timeout(), cancel).await {
                Invocation::Completed(Ok(result)) => {
                    let (status, description, data) = result.into_parts();
                    let entry = ReportEntry::new(status, description, watch.elapsed(), None, data);
                    events::check_end(registration.name(), &entry);
                    events::check_data(registration.name(), &entry);
                    entry
                }
                Invocation::Completed(Err(failure)) => {
                    if failure.is_cancellation() {
                        return Err(HealthError::Cancelled);
                    }
                    let duration = watch.elapsed();
                    let detail = failure_detail(&failure);
                    events::check_error(registration.name(), &detail, duration);
                    ReportEntry::failed(failure.to_string(), detail, duration)
                }
                Invocation::Panicked(message) => {
                    let duration = watch.elapsed();
                    events::check_error(registration.name(), &message, duration);
                    ReportEntry::failed(message.clone(), message, duration)
                }
                Invocation::TimedOut(limit) => {
                    let duration = watch.elapsed();
                    let message =
                        format!("health check timed out after {}ms", limit.as_millis());
                    events::check_error(registration.name(), &message, duration);
                    ReportEntry::failed(message.clone(), message, duration)
                }
                Invocation::Cancelled => return Err(HealthError::Cancelled),
            };

            store_entry(&mut entries, registration.name(), entry);
        }

        let total_duration = total.elapsed();
        let report = Report::new(entries, total_duration);
        events::run_end(report.status, total_duration);
        Ok(report)
    }

    /// Drive one probe with panic capture, cancellation, and timeout guards
    async fn invoke(
        &self,
        check: Arc<dyn HealthCheck>,
        context: &CheckContext,
        timeout: Option<Duration>,
        cancel: &CancellationToken,
    ) -> Invocation {
        let guarded = async {
            let future = AssertUnwindSafe(check.check_health(context, cancel)).catch_unwind();

            tokio::select! {
                biased;
                _ = cancel.cancelled() => Invocation::Cancelled,
                outcome = future => match outcome {
                    Ok(completed) => Invocation::Completed(completed),
                    Err(payload) => Invocation::Panicked(panic_message(payload)),
                },
            }
        };

        match timeout.or(self.default_timeout) {
            Some(limit) => match tokio::time::timeout(limit, guarded).await {
                Ok(invocation) => invocation,
                Err(_) => Invocation::TimedOut(limit),
            },
            None => guarded.await,
        }
    }
}

/// Scan for case-insensitive duplicate names, listing every offender
fn validate_registrations(registrations: &[Registration]) -> Result<()> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for registration in registrations {
        *counts.entry(registration.name().to_lowercase()).or_default() += 1;
    }

    let duplicates: Vec<String> = registrations
        .iter()
        .filter(|registration| counts[&registration.name().to_lowercase()] > 1)
        .map(|registration| registration.name().to_string())
        .collect();

    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(HealthError::DuplicateRegistrations(duplicates))
    }
}

/// Store an entry under the registration name, replacing any entry whose
/// key differs only by letter case. Duplicates are rejected upstream, so
/// this replacement is defensive only.
fn store_entry(entries: &mut HashMap<String, ReportEntry>, name: &str, entry: ReportEntry) {
    let colliding = entries
        .keys()
        .find(|key| key.to_lowercase() == name.to_lowercase())
        .cloned();
    if let Some(key) = colliding {
        entries.remove(&key);
    }
    entries.insert(name.to_string(), entry);
}

/// Render a captured failure with its full cause chain
fn failure_detail(failure: &HealthError) -> String {
    match failure {
        HealthError::Check(source) => format!("{source:#}"),
        other => other.to_string(),
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "health check panicked".to_string()
    }
}
