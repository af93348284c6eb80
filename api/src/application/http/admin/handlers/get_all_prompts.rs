use axum::extract::State;
use learnhub_core::domain::{
    admin::ports::AdminService, common::pagination::Paginated, prompt::entities::PromptDetails,
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
    path = "/prompts",
    tag = "admin",
    summary = "All prompts",
    security(("bearer" = [])),
    params(ListingParams),
    responses(
        (status = 200, body = Paginated<PromptDetails>),
        (status = 403, body = ApiErrorResponse),
    )
)]
pub async fn get_all_prompts(
    State(state): State<AppState>,
    RequiredAdmin(identity): RequiredAdmin,
    ListingQuery(params): ListingQuery,
) -> Result<Response<Paginated<PromptDetails>>, ApiError> {
    let prompts = state
        .service
        .get_all_prompts(identity, params.prompts_filter())
        .await?;

    Ok(Response::OK(prompts))
}
