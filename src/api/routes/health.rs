//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (ready to serve traffic)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Kubernetes liveness probe.
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Kubernetes readiness probe.
/// Returns 200 if the service is ready to accept traffic.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    match check_store_health(&state).await {
        true => StatusCode::OK,
        false => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// GET /health
///
/// Full health status with component details. The estimator check is
/// non-fatal; a down remote backend degrades estimation but event logging
/// and rollups keep working.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let store_ok = check_store_health(&state).await;
    let estimator_ok = check_estimator_health(&state).await;

    let store_status = if store_ok { "ok" } else { "error" };
    let estimator_status = if estimator_ok { "ok" } else { "error" };

    let overall_status = if store_ok && estimator_ok {
        "healthy"
    } else if store_ok {
        "degraded"
    } else {
        "unhealthy"
    };

    Json(HealthResponse {
        status: overall_status.to_string(),
        store: store_status.to_string(),
        estimator: estimator_status.to_string(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Check store health with a lightweight read
async fn check_store_health(state: &AppState) -> bool {
    state.store.events("health-probe").await.is_ok()
}

/// Check estimator health with a trivial estimation
async fn check_estimator_health(state: &AppState) -> bool {
    state.estimator.craving_suggestions("probe").await.is_ok()
}
