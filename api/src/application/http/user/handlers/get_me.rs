use axum::extract::State;
use learnhub_core::domain::user::{entities::User, ports::UserService};

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
    path = "/me",
    tag = "user",
    summary = "Current user",
    security(("bearer" = [])),
    responses(
        (status = 200, body = User),
        (status = 401, body = ApiErrorResponse),
    )
)]
pub async fn get_me(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<User>, ApiError> {
    let user = state.service.get_me(identity).await?;

    Ok(Response::OK(user))
}
