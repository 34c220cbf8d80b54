//! `/health` and `/health/ready`.
//!
//! Not part of the mocked upstream contracts; test harnesses poll them to
//! wait until a mock is up.

use axum::{extract::State, http::StatusCode, Json};
use platform_mocks_core::reducer::Reducer;
use platform_mocks_runtime::{HealthCheck, HealthStatus, Store};
use std::sync::Arc;

/// Liveness: the process answers HTTP.
#[allow(clippy::unused_async)]
pub async fn liveness() -> &'static str {
    "ok"
}

/// Readiness: 200 while the store accepts commands, 503 once it shuts down.
#[allow(clippy::unused_async)]
pub async fn readiness<S, A, E, R>(
    State(store): State<Arc<Store<S, A, E, R>>>,
) -> (StatusCode, Json<HealthCheck>)
where
    R: Reducer<State = S, Action = A, Environment = E> + Clone + Send + Sync + 'static,
    S: Send + Sync + 'static,
    A: Send + Clone + 'static,
    E: Clone + Send + Sync + 'static,
{
    let report = store.health();
    let code = match report.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };
    (code, Json(report))
}
