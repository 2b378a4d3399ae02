use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::info;

use bureau_core::api_types::HealthResponse;

use crate::state::AppState;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    info!("Health check requested");

    let api_key_configured = state.config.gemini.has_api_key();
    let status = if api_key_configured { "ok" } else { "degraded" };

    let response = HealthResponse {
        status: status.to_string(),
        version: VERSION.to_string(),
        model: state.config.gemini.model.clone(),
        api_key_configured,
    };

    (StatusCode::OK, Json(response))
}
