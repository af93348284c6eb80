use axum::extract::{Path, State};
use learnhub_core::domain::{
    user::{entities::User, ports::UserService},
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
    path = "/{user_id}",
    tag = "user",
    summary = "Get user",
    description = "The user themselves or an admin.",
    security(("bearer" = [])),
    params(("user_id" = String, Path, description = "User id")),
    responses(
        (status = 200, body = User),
        (status = 404, body = ApiErrorResponse),
    )
)]
pub async fn get_user(
    Path(user_id): Path<String>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<User>, ApiError> {
    let user = state
        .service
        .get_user(identity, RawId::Text(user_id))
        .await?;

    Ok(Response::OK(user))
}
