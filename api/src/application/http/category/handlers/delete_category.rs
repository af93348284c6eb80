use axum::extract::{Path, State};
use learnhub_core::domain::{category::ports::CategoryService, validation::RawId};

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
    path = "/{category_id}",
    tag = "category",
    summary = "Delete category",
    description = "Admin only. Refused while prompts still reference the category.",
    security(("bearer" = [])),
    params(("category_id" = String, Path, description = "Category id")),
    responses(
        (status = 200, body = MessageResponse),
        (status = 400, body = ApiErrorResponse),
        (status = 404, body = ApiErrorResponse),
    )
)]
pub async fn delete_category(
    Path(category_id): Path<String>,
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
) -> Result<Response<MessageResponse>, ApiError> {
    state
        .service
        .delete_category(identity, RawId::Text(category_id))
        .await?;

    Ok(Response::OK(MessageResponse::new("Category deleted successfully")))
}
