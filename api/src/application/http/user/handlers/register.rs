use axum::extract::State;
use learnhub_core::domain::user::{
    entities::AuthenticatedUser, ports::UserService, value_objects::RegisterUserInput,
};

use crate::application::http::{
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
    user::validators::RegisterUserValidator,
};

#[utoipa::path(
    post,
    path = "/register",
    tag = "user",
    summary = "Register",
    description = "Creates an account and returns it with an access token. The configured admin phone registers as admin.",
    request_body = RegisterUserValidator,
    responses(
        (status = 201, body = AuthenticatedUser),
        (status = 400, body = ApiErrorResponse),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<RegisterUserValidator>,
) -> Result<Response<AuthenticatedUser>, ApiError> {
    let authenticated = state
        .service
        .register(RegisterUserInput {
            name: payload.name,
            phone: payload.phone,
            password: payload.password,
        })
        .await?;

    Ok(Response::Created(authenticated))
}
