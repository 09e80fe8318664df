//! Shared registry and its builder handle

use super::Registration;
use crate::probe::{HealthCheck, ResourceMap, RunScope};
use crate::utils::error::{HealthError, Result};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::sync::Arc;
use tracing::debug;

/// The process-wide registry behind [`health_checks`]
///
/// Initialization is lazy and happens exactly once; every call site gets a
/// handle onto the same underlying configuration.
static GLOBAL_REGISTRY: Lazy<Arc<HealthRegistry>> =
    Lazy::new(|| Arc::new(HealthRegistry::new()));

/// The process-wide registry instance
pub fn global_registry() -> Arc<HealthRegistry> {
    Arc::clone(&GLOBAL_REGISTRY)
}

/// Entry point for registering probes into the shared configuration
///
/// Idempotent: composition code may call this from any number of modules
/// and every builder operates on the one shared registry. Typical wiring:
///
/// ```rust,no_run
/// # use std::sync::Arc;
/// # use vitals::{health_checks, CheckResult, Registration};
/// # struct DbCheck;
/// # #[async_trait::async_trait]
/// # impl vitals::HealthCheck for DbCheck {
/// #     async fn check_health(
/// #         &self,
/// #         _context: &vitals::CheckContext,
/// #         _cancel: &tokio_util::sync::CancellationToken,
/// #     ) -> vitals::Result<CheckResult> {
/// #         Ok(CheckResult::healthy())
/// #     }
/// # }
/// # fn main() -> vitals::Result<()> {
/// health_checks()
///     .add(Registration::new("db", |_| Arc::new(DbCheck)).with_tags(["critical"]))?;
/// # Ok(())
/// # }
/// ```
pub fn health_checks() -> HealthChecksBuilder {
    HealthChecksBuilder::new(global_registry())
}

/// Append-only accumulator of probe registrations and shared resources
pub struct HealthRegistry {
    registrations: RwLock<Vec<Registration>>,
    resources: RwLock<Arc<ResourceMap>>,
}

impl HealthRegistry {
    /// Create an isolated registry, independent of the process-wide one
    pub fn new() -> Self {
        Self {
            registrations: RwLock::new(Vec::new()),
            resources: RwLock::new(Arc::new(ResourceMap::new())),
        }
    }

    /// Append a registration to this registry
    ///
    /// Rejects malformed registrations (blank name) immediately. Duplicate
    /// names are allowed to accumulate here; they are detected when the
    /// execution engine is constructed, so independent modules can add
    /// registrations without ordering constraints.
    pub fn add(&self, registration: Registration) -> Result<()> {
        if registration.name().trim().is_empty() {
            return Err(HealthError::InvalidRegistration(
                "registration name must not be blank".to_string(),
            ));
        }

        debug!(check = registration.name(), "Registered health check");
        self.registrations.write().push(registration);
        Ok(())
    }

    /// Register a shared resource probes can resolve from the run scope
    pub fn provide<T: Any + Send + Sync>(&self, resource: T) {
        let mut resources = self.resources.write();
        let mut updated = ResourceMap::clone(resources.as_ref());
        updated.insert(TypeId::of::<T>(), Arc::new(resource));
        *resources = Arc::new(updated);
    }

    /// Number of registrations currently held
    pub fn len(&self) -> usize {
        self.registrations.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.read().is_empty()
    }

    /// Copy of the registration list, taken once per run
    pub(crate) fn snapshot(&self) -> Vec<Registration> {
        self.registrations.read().clone()
    }

    pub(crate) fn shared_resources(&self) -> Arc<ResourceMap> {
        Arc::clone(&self.resources.read())
    }
}

impl Default for HealthRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Chainable handle for registering probes
///
/// Builders are cheap: they hold a reference to the registry and can be
/// created as often as convenient.
pub struct HealthChecksBuilder {
    registry: Arc<HealthRegistry>,
}

impl HealthChecksBuilder {
    pub fn new(registry: Arc<HealthRegistry>) -> Self {
        Self { registry }
    }

    /// Append a registration; returns the builder for chaining
    pub fn add(self, registration: Registration) -> Result<Self> {
        self.registry.add(registration)?;
        Ok(self)
    }

    /// Register a ready probe instance under `name`
    ///
    /// The instance is shared across runs through a cloning factory. Probes
    /// that need per-run state should register a real factory via [`add`].
    ///
    /// [`add`]: Self::add
    pub fn add_check(self, name: impl Into<String>, check: Arc<dyn HealthCheck>) -> Result<Self> {
        self.add(Registration::new(name, move |_: &RunScope| {
            Arc::clone(&check)
        }))
    }

    /// Register a shared resource for probe factories
    pub fn provide<T: Any + Send + Sync>(self, resource: T) -> Self {
        self.registry.provide(resource);
        self
    }

    /// The registry this builder appends into
    pub fn registry(&self) -> Arc<HealthRegistry> {
        Arc::clone(&self.registry)
    }
}
