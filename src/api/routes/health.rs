//! Health check endpoint

use axum::{extract::State, Json};

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// Public liveness probe
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
    })
}
