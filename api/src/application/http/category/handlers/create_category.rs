use axum::extract::State;
use learnhub_core::domain::category::{
    entities::Category, ports::CategoryService, value_objects::CreateCategoryInput,
};

use crate::application::http::{
    category::validators::CreateCategoryValidator,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "",
    tag = "category",
    summary = "Create category",
    request_body = CreateCategoryValidator,
    responses(
        (status = 201, body = Category),
        (status = 400, body = ApiErrorResponse),
    )
)]
pub async fn create_category(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<CreateCategoryValidator>,
) -> Result<Response<Category>, ApiError> {
    let category = state
        .service
        .create_category(CreateCategoryInput { name: payload.name })
        .await?;

    Ok(Response::Created(category))
}
