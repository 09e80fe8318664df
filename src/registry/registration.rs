//! Registration descriptor

use crate::probe::{HealthCheck, RunScope};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Factory producing a probe instance bound to a run's dependency scope
pub type CheckFactory = Arc<dyn Fn(&RunScope) -> Arc<dyn HealthCheck> + Send + Sync>;

/// Immutable descriptor binding a probe name to its factory
///
/// Registrations are created at configuration time and live for the process
/// lifetime. The factory runs fresh for every health run, so probes may
/// carry per-run state.
#[derive(Clone)]
pub struct Registration {
    name: String,
    tags: HashSet<String>,
    factory: CheckFactory,
    timeout: Option<Duration>,
}

impl Registration {
    /// Create a registration for `name` with the given probe factory
    pub fn new<F>(name: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&RunScope) -> Arc<dyn HealthCheck> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            tags: HashSet::new(),
            factory: Arc::new(factory),
            timeout: None,
        }
    }

    /// Attach filter tags; tags are opaque to the engine
    pub fn with_tags<I>(mut self, tags: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Bound this probe's execution time, overriding the engine default
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Case-insensitive unique key within a registry
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tags(&self) -> &HashSet<String> {
        &self.tags
    }

    /// Whether this registration carries the given tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Per-probe timeout; `None` leaves the probe bounded only by the
    /// engine default and the caller's cancellation
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Instantiate the probe for one run
    pub(crate) fn create(&self, scope: &RunScope) -> Arc<dyn HealthCheck> {
        (self.factory)(scope)
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("tags", &self.tags)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
