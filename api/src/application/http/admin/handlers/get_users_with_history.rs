use axum::extract::State;
use learnhub_core::domain::{
    admin::{ports::AdminService, value_objects::UserWithHistory},
    common::pagination::Paginated,
};

use crate::application::{
    auth::RequiredAdmin,
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
    path = "/users",
    tag = "admin",
    summary = "Users with history",
    description = "Paginated users, each with a prompt count and their five newest prompts.",
    security(("bearer" = [])),
    params(ListingParams),
    responses(
        (status = 200, body = Paginated<UserWithHistory>),
        (status = 403, body = ApiErrorResponse),
    )
)]
pub async fn get_users_with_history(
    State(state): State<AppState>,
    RequiredAdmin(identity): RequiredAdmin,
    ListingQuery(params): ListingQuery,
) -> Result<Response<Paginated<UserWithHistory>>, ApiError> {
    let users = state
        .service
        .get_users_with_history(identity, params.users_filter())
        .await?;

    Ok(Response::OK(users))
}
