use axum::extract::{Path, State};
use learnhub_core::domain::{
    category::{entities::CategoryWithSubCategories, ports::CategoryService},
    validation::RawId,
};

use crate::application::http::server::{
    api_entities::{
        api_error::{ApiError, ApiErrorResponse},
        response::Response,
    },
    app_state::AppState,
};

#[utoipa::path(
    get,
    path = "/{category_id}",
    tag = "category",
    summary = "Get category",
    params(("category_id" = String, Path, description = "Category id")),
    responses(
        (status = 200, body = CategoryWithSubCategories),
        (status = 404, body = ApiErrorResponse),
    )
)]
pub async fn get_category(
    Path(category_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Response<CategoryWithSubCategories>, ApiError> {
    let category = state
        .service
        .get_category(RawId::Text(category_id))
        .await?;

    Ok(Response::OK(category))
}
