use axum::extract::{Path, State};
use learnhub_core::domain::{
    common::pagination::Paginated,
    prompt::{entities::PromptDetails, ports::PromptService},
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
    path = "/user/{user_id}",
    tag = "prompt",
    summary = "Prompts of a user",
    security(("bearer" = [])),
    params(("user_id" = String, Path, description = "User id"), ListingParams),
    responses(
        (status = 200, body = Paginated<PromptDetails>),
        (status = 403, body = ApiErrorResponse),
    )
)]
pub async fn get_user_prompts(
    Path(user_id): Path<String>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ListingQuery(params): ListingQuery,
) -> Result<Response<Paginated<PromptDetails>>, ApiError> {
    let prompts = state
        .service
        .get_user_prompts(identity, RawId::Text(user_id), params.prompts_filter())
        .await?;

    Ok(Response::OK(prompts))
}
