use axum::extract::State;
use learnhub_core::domain::{
    common::pagination::Paginated,
    prompt::{entities::PromptDetails, ports::PromptService},
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
    tag = "prompt",
    summary = "List prompts",
    description = "Admins see every prompt, other callers only their own.",
    security(("bearer" = [])),
    params(ListingParams),
    responses(
        (status = 200, body = Paginated<PromptDetails>),
        (status = 400, body = ApiErrorResponse),
    )
)]
pub async fn get_prompts(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ListingQuery(params): ListingQuery,
) -> Result<Response<Paginated<PromptDetails>>, ApiError> {
    let prompts = state
        .service
        .get_prompts(identity, params.prompts_filter())
        .await?;

    Ok(Response::OK(prompts))
}
