use axum::extract::State;
use learnhub_core::domain::prompt::{
    entities::GeneratedPrompt, ports::PromptService, value_objects::GeneratePromptInput,
};

use crate::application::{
    auth::RequiredIdentity,
    http::{
        prompt::validators::GeneratePromptValidator,
        server::{
            api_entities::{
                api_error::{ApiError, ApiErrorResponse, ValidateJson},
                response::Response,
            },
            app_state::AppState,
        },
    },
};

#[utoipa::path(
    post,
    path = "/generate",
    tag = "prompt",
    summary = "Generate a lesson",
    description = "Sends the prompt to the language model and stores it with the lesson. A templated lesson is stored when the model fails or times out.",
    security(("bearer" = [])),
    request_body = GeneratePromptValidator,
    responses(
        (status = 201, body = GeneratedPrompt),
        (status = 400, body = ApiErrorResponse),
        (status = 403, body = ApiErrorResponse),
    )
)]
pub async fn generate_prompt(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    ValidateJson(payload): ValidateJson<GeneratePromptValidator>,
) -> Result<Response<GeneratedPrompt>, ApiError> {
    let generated = state
        .service
        .generate_prompt(
            identity,
            GeneratePromptInput {
                user_id: payload.user_id,
                category_id: payload.category_id,
                sub_category_id: payload.sub_category_id,
                prompt: payload.prompt,
            },
        )
        .await?;

    Ok(Response::Created(generated))
}
