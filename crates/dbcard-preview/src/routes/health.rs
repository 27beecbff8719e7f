//! Health check endpoint.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    /// Whether a data-service client is configured.
    data_service: bool,
}

/// Public health check endpoint.
///
/// Returns basic service health for load balancer probes. Does not contact
/// the data service.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "dbcard-preview",
        version: env!("CARGO_PKG_VERSION"),
        data_service: state.store.is_some(),
    })
}
