//! Health trigger endpoints
//!
//! Every request here is a synchronous pull: the engine runs the probes on
//! demand and the handler maps the aggregate status onto an HTTP response.
//! There is no background polling and no cached report.

use crate::report::Status;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/health")
            .route("", web::get().to(health_report))
            .route("/live", web::get().to(liveness))
            .route("/ready", web::get().to(readiness)),
    )
    .route("/heartbeat", web::get().to(heartbeat))
    .route("/version", web::get().to(version_info));
}

/// Query parameters for the report endpoint
#[derive(Debug, serde::Deserialize)]
pub struct HealthQuery {
    /// Restrict the run to registrations carrying this tag
    tag: Option<String>,
}

/// Plain-text heartbeat
///
/// Runs all probes and answers 200 with the aggregate status name in the
/// body; callers that only need up/down parse the one word.
pub async fn heartbeat(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    info!("Received heartbeat request");

    let report = state.health.check_health(&CancellationToken::new()).await?;

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(report.status.to_string()))
}

/// Full JSON report
///
/// Healthy and Degraded map to 200 (the workload still serves traffic);
/// Unhealthy maps to 503. `?tag=` restricts the run to matching probes.
pub async fn health_report(
    state: web::Data<AppState>,
    query: web::Query<HealthQuery>,
) -> ActixResult<HttpResponse> {
    debug!("Health report requested");

    let cancel = CancellationToken::new();
    let report = match &query.tag {
        Some(tag) => {
            state
                .health
                .check_health_filtered(|registration| registration.has_tag(tag), &cancel)
                .await?
        }
        None => state.health.check_health(&cancel).await?,
    };

    let status_code = match report.status {
        Status::Healthy | Status::Degraded => actix_web::http::StatusCode::OK,
        Status::Unhealthy => actix_web::http::StatusCode::SERVICE_UNAVAILABLE,
    };

    Ok(HttpResponse::build(status_code).json(ApiResponse::success(report)))
}

/// Liveness probe: answers as long as the process serves requests
pub async fn liveness() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Alive")
}

/// Readiness probe: runs the checks and gates on the aggregate status
pub async fn readiness(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let report = state.health.check_health(&CancellationToken::new()).await?;

    if report.status.is_serving() {
        Ok(HttpResponse::Ok()
            .content_type("text/plain; charset=utf-8")
            .body("Ready"))
    } else {
        Ok(HttpResponse::ServiceUnavailable()
            .content_type("text/plain; charset=utf-8")
            .body("Not Ready"))
    }
}

/// Version and build information
pub async fn version_info() -> HttpResponse {
    let version = VersionInfo {
        version: env!("CARGO_PKG_VERSION"),
        build_time: env!("BUILD_TIME"),
        git_hash: env!("GIT_HASH"),
    };

    HttpResponse::Ok().json(ApiResponse::success(version))
}

/// Version information
#[derive(Debug, Clone, serde::Serialize)]
struct VersionInfo {
    version: &'static str,
    build_time: &'static str,
    git_hash: &'static str,
}
