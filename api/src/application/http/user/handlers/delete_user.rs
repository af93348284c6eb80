use axum::extract::{Path, State};
use learnhub_core::domain::{user::ports::UserService, validation::RawId};

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
    path = "/{user_id}",
    tag = "user",
    summary = "Delete user",
    description = "Admin only. Removes the user and every prompt they own.",
    security(("bearer" = [])),
    params(("user_id" = String, Path, description = "User id")),
    responses(
        (status = 200, body = MessageResponse),
        (status = 404, body = ApiErrorResponse),
    )
)]
pub async fn delete_user(
    Path(user_id): Path<String>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<MessageResponse>, ApiError> {
    state
        .service
        .delete_user(identity, RawId::Text(user_id))
        .await?;

    Ok(Response::OK(MessageResponse::new("User deleted successfully")))
}
