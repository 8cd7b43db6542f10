use crate::state::AppState;
use axum::{extract::State, http::StatusCode};
use log::warn;

/// Simple endpoint that returns "OK" when the service and its storage are reachable
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", content_type = "text/plain", body = String),
        (status = 503, description = "Storage is unreachable", content_type = "text/plain", body = String)
    ),
    tag = "Health"
)]
pub async fn health(State(state): State<AppState>) -> (StatusCode, &'static str) {
    match state.repository.health_check().await {
        Ok(true) => (StatusCode::OK, "OK"),
        Ok(false) => (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE"),
        Err(e) => {
            warn!("Health check failed: {e}");
            (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE")
        }
    }
}
