use axum::extract::{Path, State};
use learnhub_core::domain::{
    user::{ports::UserService, value_objects::UserAnalytics},
    validation::RawId,
};

use crate::application::{
    auth::RequiredIdentity,
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
    path = "/{user_id}/analytics",
    tag = "user",
    summary = "Usage analytics",
    description = "Prompt totals and the last 30 days of daily activity.",
    security(("bearer" = [])),
    params(("user_id" = String, Path, description = "User id")),
    responses(
        (status = 200, body = UserAnalytics),
        (status = 404, body = ApiErrorResponse),
    )
)]
pub async fn get_user_analytics(
    Path(user_id): Path<String>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<UserAnalytics>, ApiError> {
    let analytics = state
        .service
        .get_user_analytics(identity, RawId::Text(user_id))
        .await?;

    Ok(Response::OK(analytics))
}
