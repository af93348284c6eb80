use axum::extract::{Path, State};
use learnhub_core::domain::{prompt::ports::PromptService, validation::RawId};

use crate::application::{
    auth::RequiredIdentity,
    http::server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse},
            response::{MessageResponse, Response},
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    delete,
    path = "/{prompt_id}",
    tag = "prompt",
    summary = "Delete prompt",
    security(("bearer" = [])),
    params(("prompt_id" = String, Path, description = "Prompt id")),
    responses(
        (status = 200, body = MessageResponse),
        (status = 404, body = ApiErrorResponse),
    )
)]
pub async fn delete_prompt(
    Path(prompt_id): Path<String>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<MessageResponse>, ApiError> {
    state
        .service
        .delete_prompt(identity, RawId::Text(prompt_id))
        .await?;

    Ok(Response::OK(MessageResponse::new("Prompt deleted successfully")))
}
