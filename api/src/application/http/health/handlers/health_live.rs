use axum::extract::State;
use learnhub_core::domain::health::ports::HealthCheckService;
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{
        api_error::{ApiError, ApiErrorResponse},
        response::Response,
    },
    app_state::AppState,
};

#[derive(Debug, Serialize, ToSchema, PartialEq, Eq)]
pub struct LiveResponse {
    pub status: String,
    pub database_latency_ms: u64,
}

#[utoipa::path(
    get,
    path = "",
    tag = "health",
    summary = "Liveness",
    responses(
        (status = 200, body = LiveResponse),
        (status = 500, body = ApiErrorResponse),
    )
)]
pub async fn health_live(State(state): State<AppState>) -> Result<Response<LiveResponse>, ApiError> {
    let latency = state.service.health().await?;

    Ok(Response::OK(LiveResponse {
        status: "ok".to_string(),
        database_latency_ms: latency,
    }))
}
