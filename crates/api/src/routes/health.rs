//! Health check endpoints for monitoring and orchestration.

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::app::AppState;

/// GET /api/health
///
/// Full health check including database connectivity.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let db_healthy = sqlx::query("SELECT 1")
        .fetch_one(&state.pool)
        .await
        .is_ok();

    let status = if db_healthy { "healthy" } else { "unhealthy" };
    let code = if db_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        code,
        Json(json!({
            "status": status,
            "version": env!("CARGO_PKG_VERSION"),
            "database": if db_healthy { "connected" } else { "disconnected" },
        })),
    )
}

/// GET /api/health/ready
///
/// Readiness probe: the service can take traffic once the database pool
/// answers queries.
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match sqlx::query("SELECT 1").fetch_one(&state.pool).await {
        Ok(_) => (StatusCode::OK, Json(json!({ "status": "ready" }))),
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "not_ready" })),
        ),
    }
}

/// GET /api/health/live
///
/// Liveness probe: answers as long as the process is up.
pub async fn live() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "alive" })))
}
