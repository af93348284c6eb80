use axum::extract::{Path, State};
use learnhub_core::domain::{
    prompt::{entities::PromptDetails, ports::PromptService},
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
    path = "/{prompt_id}",
    tag = "prompt",
    summary = "Get prompt",
    security(("bearer" = [])),
    params(("prompt_id" = String, Path, description = "Prompt id")),
    responses(
        (status = 200, body = PromptDetails),
        (status = 404, body = ApiErrorResponse),
    )
)]
pub async fn get_prompt(
    Path(prompt_id): Path<String>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<PromptDetails>, ApiError> {
    let prompt = state
        .service
        .get_prompt(identity, RawId::Text(prompt_id))
        .await?;

    Ok(Response::OK(prompt))
}
