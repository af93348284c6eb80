use axum::extract::State;
use learnhub_core::domain::{
    common::pagination::Paginated,
    user::{entities::UserSummary, ports::UserService},
};

use crate::application::{
    auth::RequiredIdentity,
    http::{
        query_extractor::ListingQuery,
        query_params::ListingParams,
        server::{
            api_entities::{
                api_error::{ApiError, ApiErrorResponse},
                response::Response,
            },
            app_state::AppState,
        },
    },
};

#[utoipa::path(
    get,
    path = "",
    tag = "user",
    summary = "List users",
    description = "Admin only. Newest first, each with a prompt count.",
    security(("bearer" = [])),
    params(ListingParams),
    responses(
        (status = 200, body = Paginated<UserSummary>),
        (status = 403, body = ApiErrorResponse),
    )
)]
pub async fn get_users(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ListingQuery(params): ListingQuery,
) -> Result<Response<Paginated<UserSummary>>, ApiError> {
    let users = state
        .service
        .get_users(identity, params.users_filter())
        .await?;

    Ok(Response::OK(users))
}
