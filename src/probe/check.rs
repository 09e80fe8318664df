//! Health check capability and result types

use crate::registry::Registration;
use crate::report::Status;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio_util::sync::CancellationToken;

/// A pluggable unit of work answering "is this dependency OK?"
///
/// Implementations answer with a [`CheckResult`]; raising an error instead
/// is treated as an unexpected failure and captured into the report, except
/// for [`HealthError::Cancelled`](crate::HealthError::Cancelled) which
/// aborts the whole run. Probes should observe `cancel` across any I/O they
/// perform.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Run the probe once and report its outcome
    async fn check_health(
        &self,
        context: &CheckContext,
        cancel: &CancellationToken,
    ) -> Result<CheckResult>;
}

/// Per-invocation context handed to a probe
///
/// Carries the registration the engine is currently executing, so shared
/// probe implementations can read their configured name, tags, or timeout.
#[derive(Debug, Clone)]
pub struct CheckContext {
    registration: Registration,
}

impl CheckContext {
    pub(crate) fn new(registration: Registration) -> Self {
        Self { registration }
    }

    /// The registration being executed
    pub fn registration(&self) -> &Registration {
        &self.registration
    }

    /// Shorthand for the registration name
    pub fn name(&self) -> &str {
        self.registration.name()
    }
}

/// What a probe returns on a normal completion
#[derive(Debug, Clone)]
pub struct CheckResult {
    status: Status,
    description: Option<String>,
    data: BTreeMap<String, serde_json::Value>,
}

impl CheckResult {
    /// Result with the given status and no description
    pub fn new(status: Status) -> Self {
        Self {
            status,
            description: None,
            data: BTreeMap::new(),
        }
    }

    /// A healthy result
    pub fn healthy() -> Self {
        Self::new(Status::Healthy)
    }

    /// A degraded result with a description of what is degraded
    pub fn degraded(description: impl Into<String>) -> Self {
        Self::new(Status::Degraded).with_description(description)
    }

    /// An unhealthy result with a description of what failed
    pub fn unhealthy(description: impl Into<String>) -> Self {
        Self::new(Status::Unhealthy).with_description(description)
    }

    /// Attach or replace the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach one diagnostic key/value pair
    pub fn with_data(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn data(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.data
    }

    pub(crate) fn into_parts(
        self,
    ) -> (Status, Option<String>, BTreeMap<String, serde_json::Value>) {
        (self.status, self.description, self.data)
    }
}
