use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response as AxumResponse},
};
use learnhub_core::domain::health::{entities::DatabaseHealthStatus, ports::HealthCheckService};

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::ApiSuccess},
    app_state::AppState,
};

#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    summary = "Readiness",
    description = "503 while the database is unreachable.",
    responses(
        (status = 200, body = DatabaseHealthStatus),
        (status = 503, body = DatabaseHealthStatus),
    )
)]
pub async fn health_ready(State(state): State<AppState>) -> Result<AxumResponse, ApiError> {
    let status = state.service.readness().await?;

    let code = if status.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    Ok((
        code,
        Json(ApiSuccess {
            success: status.is_healthy(),
            data: status,
        }),
    )
        .into_response())
}
