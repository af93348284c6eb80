use axum::extract::State;
use learnhub_core::domain::user::{
    entities::AuthenticatedUser, ports::UserService, value_objects::LoginInput,
};

use crate::application::http::{
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
    user::validators::LoginValidator,
};

#[utoipa::path(
    post,
    path = "/login",
    tag = "user",
    summary = "Login",
    request_body = LoginValidator,
    responses(
        (status = 200, body = AuthenticatedUser),
        (status = 400, body = ApiErrorResponse),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<LoginValidator>,
) -> Result<Response<AuthenticatedUser>, ApiError> {
    let authenticated = state
        .service
        .login(LoginInput {
            phone: payload.phone,
            password: payload.password,
        })
        .await?;

    Ok(Response::OK(authenticated))
}
