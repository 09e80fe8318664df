//! Integration tests for the execution engine
//!
//! Covers the run semantics end to end: one entry per selected
//! registration, worst-status-wins aggregation, failure isolation,
//! cancellation, filtering, and timeouts.

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use vitals::{
    CheckContext, CheckResult, HealthCheck, HealthError, HealthRegistry, HealthService,
    Registration, Result, Status,
};

/// Probe returning a fixed outcome, optionally after a delay
struct Fixed {
    status: Status,
    description: Option<&'static str>,
    delay: Duration,
}

impl Fixed {
    fn healthy() -> Self {
        Self {
            status: Status::Healthy,
            description: None,
            delay: Duration::ZERO,
        }
    }

    fn degraded(description: &'static str) -> Self {
        Self {
            status: Status::Degraded,
            description: Some(description),
            delay: Duration::ZERO,
        }
    }

    fn healthy_after(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::healthy()
        }
    }
}

#[async_trait]
impl HealthCheck for Fixed {
    async fn check_health(
        &self,
        _context: &CheckContext,
        _cancel: &CancellationToken,
    ) -> Result<CheckResult> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let mut result = CheckResult::new(self.status);
        if let Some(description) = self.description {
            result = result.with_description(description);
        }
        Ok(result)
    }
}

/// Probe that raises an unexpected failure
struct Failing(&'static str);

#[async_trait]
impl HealthCheck for Failing {
    async fn check_health(
        &self,
        _context: &CheckContext,
        _cancel: &CancellationToken,
    ) -> Result<CheckResult> {
        Err(HealthError::check(self.0))
    }
}

/// Probe that panics instead of returning
struct Panicking;

#[async_trait]
impl HealthCheck for Panicking {
    async fn check_health(
        &self,
        _context: &CheckContext,
        _cancel: &CancellationToken,
    ) -> Result<CheckResult> {
        panic!("probe exploded");
    }
}

/// Probe that records it ran, then reports healthy
struct Recording(Arc<AtomicBool>);

#[async_trait]
impl HealthCheck for Recording {
    async fn check_health(
        &self,
        _context: &CheckContext,
        _cancel: &CancellationToken,
    ) -> Result<CheckResult> {
        self.0.store(true, Ordering::SeqCst);
        Ok(CheckResult::healthy())
    }
}

/// Probe that triggers the shared cancellation signal
struct Cancelling;

#[async_trait]
impl HealthCheck for Cancelling {
    async fn check_health(
        &self,
        _context: &CheckContext,
        cancel: &CancellationToken,
    ) -> Result<CheckResult> {
        cancel.cancel();
        Err(HealthError::Cancelled)
    }
}

fn service(registry: Arc<HealthRegistry>) -> HealthService {
    HealthService::new(registry).expect("registrations should be valid")
}

#[tokio::test]
async fn mixed_outcomes_reduce_to_worst_status() {
    let registry = Arc::new(HealthRegistry::new());
    registry
        .add(Registration::new("db", |_| {
            Arc::new(Fixed::healthy_after(Duration::from_millis(5)))
        }))
        .unwrap();
    registry
        .add(Registration::new("cache", |_| {
            Arc::new(Failing("cache backend unreachable"))
        }))
        .unwrap();
    registry
        .add(Registration::new("disk", |_| {
            Arc::new(Fixed::degraded("low space"))
        }))
        .unwrap();

    let report = service(registry)
        .check_health(&CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.status, Status::Unhealthy);
    assert_eq!(report.entries.len(), 3);

    let cache = report.entry("cache").unwrap();
    assert_eq!(cache.status, Status::Unhealthy);
    assert!(
        cache
            .error
            .as_deref()
            .unwrap()
            .contains("cache backend unreachable")
    );

    let disk = report.entry("disk").unwrap();
    assert_eq!(disk.status, Status::Degraded);
    assert_eq!(disk.description.as_deref(), Some("low space"));

    let db = report.entry("db").unwrap();
    assert_eq!(db.status, Status::Healthy);
    assert!(db.duration >= Duration::from_millis(5));
    assert!(report.total_duration >= db.duration);
}

#[tokio::test]
async fn empty_registry_yields_healthy_report() {
    let registry = Arc::new(HealthRegistry::new());

    let report = service(registry)
        .check_health(&CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.status, Status::Healthy);
    assert!(report.entries.is_empty());
}

#[tokio::test]
async fn failing_and_panicking_probes_are_isolated() {
    let registry = Arc::new(HealthRegistry::new());
    registry
        .add(Registration::new("broken", |_| Arc::new(Failing("boom"))))
        .unwrap();
    registry
        .add(Registration::new("panicky", |_| Arc::new(Panicking)))
        .unwrap();
    registry
        .add(Registration::new("steady", |_| Arc::new(Fixed::healthy())))
        .unwrap();

    let report = service(registry)
        .check_health(&CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.entries.len(), 3);
    assert_eq!(report.status, Status::Unhealthy);
    assert_eq!(report.entry("steady").unwrap().status, Status::Healthy);

    let panicky = report.entry("panicky").unwrap();
    assert_eq!(panicky.status, Status::Unhealthy);
    assert!(panicky.error.as_deref().unwrap().contains("probe exploded"));
}

#[tokio::test]
async fn pre_triggered_cancellation_aborts_without_running_probes() {
    let ran = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&ran);

    let registry = Arc::new(HealthRegistry::new());
    registry
        .add(Registration::new("recorded", move |_| {
            Arc::new(Recording(Arc::clone(&flag)))
        }))
        .unwrap();

    let token = CancellationToken::new();
    token.cancel();

    let result = service(registry).check_health(&token).await;

    assert!(matches!(result, Err(HealthError::Cancelled)));
    assert!(!ran.load(Ordering::SeqCst));
}

#[tokio::test]
async fn cancellation_mid_run_discards_partial_results() {
    let ran = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&ran);

    let registry = Arc::new(HealthRegistry::new());
    registry
        .add(Registration::new("first", |_| Arc::new(Fixed::healthy())))
        .unwrap();
    registry
        .add(Registration::new("trigger", |_| Arc::new(Cancelling)))
        .unwrap();
    registry
        .add(Registration::new("after", move |_| {
            Arc::new(Recording(Arc::clone(&flag)))
        }))
        .unwrap();

    let result = service(registry).check_health(&CancellationToken::new()).await;

    assert!(matches!(result, Err(HealthError::Cancelled)));
    assert!(!ran.load(Ordering::SeqCst));
}

#[tokio::test]
async fn tag_filter_excludes_unmatched_registrations() {
    let registry = Arc::new(HealthRegistry::new());
    registry
        .add(
            Registration::new("db", |_| Arc::new(Fixed::healthy()))
                .with_tags(["critical"]),
        )
        .unwrap();
    registry
        .add(Registration::new("worker", |_| Arc::new(Fixed::healthy())))
        .unwrap();

    let report = service(registry)
        .check_health_filtered(
            |registration| registration.has_tag("critical"),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(report.entries.len(), 1);
    assert!(report.entry("db").is_some());
    assert!(report.entry("worker").is_none());
}

#[tokio::test]
async fn per_registration_timeout_is_isolated() {
    let registry = Arc::new(HealthRegistry::new());
    registry
        .add(
            Registration::new("slow", |_| {
                Arc::new(Fixed::healthy_after(Duration::from_millis(500)))
            })
            .with_timeout(Duration::from_millis(50)),
        )
        .unwrap();
    registry
        .add(Registration::new("fast", |_| Arc::new(Fixed::healthy())))
        .unwrap();

    let report = service(registry)
        .check_health(&CancellationToken::new())
        .await
        .unwrap();

    let slow = report.entry("slow").unwrap();
    assert_eq!(slow.status, Status::Unhealthy);
    assert!(slow.error.as_deref().unwrap().contains("timed out"));
    assert_eq!(report.entry("fast").unwrap().status, Status::Healthy);
}

#[tokio::test]
async fn default_timeout_applies_when_registration_has_none() {
    let registry = Arc::new(HealthRegistry::new());
    registry
        .add(Registration::new("slow", |_| {
            Arc::new(Fixed::healthy_after(Duration::from_millis(500)))
        }))
        .unwrap();

    let service =
        HealthService::with_default_timeout(registry, Some(Duration::from_millis(50))).unwrap();
    let report = service.check_health(&CancellationToken::new()).await.unwrap();

    assert_eq!(report.entry("slow").unwrap().status, Status::Unhealthy);
}

#[tokio::test]
async fn duplicate_names_are_rejected_at_construction() {
    let registry = Arc::new(HealthRegistry::new());
    registry
        .add(Registration::new("Storage", |_| Arc::new(Fixed::healthy())))
        .unwrap();
    registry
        .add(Registration::new("storage", |_| Arc::new(Fixed::healthy())))
        .unwrap();

    let error = HealthService::new(registry).unwrap_err();
    let message = error.to_string();
    assert!(message.contains("Storage"));
    assert!(message.contains("storage"));
}

#[tokio::test]
async fn factories_run_fresh_for_every_run() {
    let instantiations = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&instantiations);

    let registry = Arc::new(HealthRegistry::new());
    registry
        .add(Registration::new("counted", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Arc::new(Fixed::healthy())
        }))
        .unwrap();

    let service = service(registry);
    let token = CancellationToken::new();
    service.check_health(&token).await.unwrap();
    service.check_health(&token).await.unwrap();

    assert_eq!(instantiations.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn factories_resolve_provided_resources() {
    #[derive(Debug)]
    struct Pool(&'static str);

    struct PoolCheck {
        pool: Option<Arc<Pool>>,
    }

    #[async_trait]
    impl HealthCheck for PoolCheck {
        async fn check_health(
            &self,
            _context: &CheckContext,
            _cancel: &CancellationToken,
        ) -> Result<CheckResult> {
            match &self.pool {
                Some(pool) => Ok(CheckResult::healthy().with_data("pool", pool.0)),
                None => Ok(CheckResult::unhealthy("no pool configured")),
            }
        }
    }

    let registry = Arc::new(HealthRegistry::new());
    registry.provide(Pool("primary"));
    registry
        .add(Registration::new("pool", |scope| {
            Arc::new(PoolCheck {
                pool: scope.resource::<Pool>(),
            })
        }))
        .unwrap();

    let report = service(registry)
        .check_health(&CancellationToken::new())
        .await
        .unwrap();

    let entry = report.entry("pool").unwrap();
    assert_eq!(entry.status, Status::Healthy);
    assert_eq!(entry.data["pool"], "primary");
}

#[tokio::test]
async fn concurrent_runs_are_independent() {
    let registry = Arc::new(HealthRegistry::new());
    registry
        .add(Registration::new("db", |_| {
            Arc::new(Fixed::healthy_after(Duration::from_millis(10)))
        }))
        .unwrap();

    let service = Arc::new(service(registry));
    let token = CancellationToken::new();

    let (left, right) = tokio::join!(
        service.check_health(&token),
        service.check_health(&token)
    );

    assert_eq!(left.unwrap().status, Status::Healthy);
    assert_eq!(right.unwrap().status, Status::Healthy);
}
