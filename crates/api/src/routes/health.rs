use axum::extract::State;
use axum::{routing::get, Router};
use serde::Serialize;

use crate::response::Success;
use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Which record store is serving requests.
    pub store: &'static str,
    /// Whether the store answered its health check.
    pub store_healthy: bool,
}

/// GET /health -- returns service and store health. No credential needed.
async fn health_check(State(state): State<AppState>) -> axum::Json<Success<HealthResponse>> {
    let store_healthy = match state.store.health_check().await {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(error = %err, "Store health check failed");
            false
        }
    };

    let status = if store_healthy { "ok" } else { "degraded" };

    Success::json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        store: state.store.backend_name(),
        store_healthy,
    })
}

/// Mount health check routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
