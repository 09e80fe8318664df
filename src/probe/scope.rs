//! Per-run dependency scope

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

pub(crate) type ResourceMap = HashMap<TypeId, Arc<dyn Any + Send + Sync>>;

/// Dependency-resolution scope for one health run
///
/// A fresh scope is created for every run and dropped when the run ends on
/// any path, so per-run probe state is never shared between overlapping
/// runs. Probe factories receive the scope and may resolve shared resources
/// registered at configuration time.
#[derive(Clone)]
pub struct RunScope {
    run_id: Uuid,
    resources: Arc<ResourceMap>,
}

impl std::fmt::Debug for RunScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunScope")
            .field("run_id", &self.run_id)
            .field("resources", &self.resources.len())
            .finish()
    }
}

impl RunScope {
    pub(crate) fn new(resources: Arc<ResourceMap>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            resources,
        }
    }

    /// Correlation id for this run, unique per invocation
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Resolve a shared resource by type
    ///
    /// Returns `None` when nothing of type `T` was provided to the registry.
    pub fn resource<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.resources
            .get(&TypeId::of::<T>())
            .and_then(|resource| Arc::clone(resource).downcast::<T>().ok())
    }
}
