//! Root-level liveness route.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database is unreachable.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Whether a notification dispatcher is listening on the event bus.
    /// Records are still accepted without one; their notices are dropped.
    pub notifications_active: bool,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = records_db::health_check(&state.pool).await.is_ok();
    let notifications_active = state.event_bus.subscriber_count() > 0;

    if !notifications_active {
        tracing::warn!("Health check: no notification dispatcher subscribed");
    }

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        notifications_active,
    })
}

/// Mounted at the root, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
