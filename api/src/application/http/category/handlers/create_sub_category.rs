use axum::extract::State;
use learnhub_core::domain::category::{
    entities::SubCategory, ports::CategoryService, value_objects::CreateSubCategoryInput,
};

use crate::application::http::{
    category::validators::CreateSubCategoryValidator,
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
    path = "/sub-categories",
    tag = "category",
    summary = "Create sub-category",
    request_body = CreateSubCategoryValidator,
    responses(
        (status = 201, body = SubCategory),
        (status = 400, body = ApiErrorResponse),
        (status = 404, body = ApiErrorResponse),
    )
)]
pub async fn create_sub_category(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<CreateSubCategoryValidator>,
) -> Result<Response<SubCategory>, ApiError> {
    let sub_category = state
        .service
        .create_sub_category(CreateSubCategoryInput {
            name: payload.name,
            category_id: payload.category_id,
        })
        .await?;

    Ok(Response::Created(sub_category))
}
