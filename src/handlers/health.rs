use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;

use crate::models::HealthStatus;
use crate::AppState;

/// Proxy the browser's health check to the backend origin. Upstream 2xx
/// bodies pass through untouched; every failure becomes a 503 with a
/// human-readable message and a fresh timestamp.
pub async fn health_check(State(state): State<AppState>) -> Response {
    match state.backend.check_health().await {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "Backend health check failed");

            let body = HealthStatus::error(err.to_string(), Utc::now());
            (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
        }
    }
}
