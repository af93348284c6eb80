use axum::extract::State;
use learnhub_core::domain::admin::{ports::AdminService, value_objects::DashboardStats};

use crate::application::{
    auth::RequiredAdmin,
    http::server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "admin",
    summary = "Dashboard",
    description = "Totals, prompts per category and the five newest prompts.",
    security(("bearer" = [])),
    responses(
        (status = 200, body = DashboardStats),
        (status = 403, body = ApiErrorResponse),
    )
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    RequiredAdmin(identity): RequiredAdmin,
) -> Result<Response<DashboardStats>, ApiError> {
    let stats = state.service.get_dashboard(identity).await?;

    Ok(Response::OK(stats))
}
