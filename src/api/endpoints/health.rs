//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model_loaded: bool,
    pub version: &'static str,
    pub started_at: String,
}

/// `GET /api/health`: liveness plus model availability.
pub async fn check(State(ctx): State<ApiContext>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        model_loaded: ctx.core.model_loaded(),
        version: crate::config::APP_VERSION,
        started_at: ctx.core.started_at().to_rfc3339(),
    })
}
