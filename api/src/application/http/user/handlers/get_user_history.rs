use axum::extract::{Path, State};
use learnhub_core::domain::{
    common::pagination::Paginated, prompt::entities::PromptDetails, user::ports::UserService,
    validation::RawId,
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
    path = "/{user_id}/history",
    tag = "user",
    summary = "Prompt history",
    description = "Paginated prompts of one user, newest first.",
    security(("bearer" = [])),
    params(("user_id" = String, Path, description = "User id"), ListingParams),
    responses(
        (status = 200, body = Paginated<PromptDetails>),
        (status = 403, body = ApiErrorResponse),
    )
)]
pub async fn get_user_history(
    Path(user_id): Path<String>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ListingQuery(params): ListingQuery,
) -> Result<Response<Paginated<PromptDetails>>, ApiError> {
    let history = state
        .service
        .get_user_history(identity, RawId::Text(user_id), params.prompts_filter())
        .await?;

    Ok(Response::OK(history))
}
