use axum::extract::{Path, State};
use learnhub_core::domain::{
    category::{entities::SubCategory, ports::CategoryService},
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
    path = "/{category_id}/sub-categories",
    tag = "category",
    summary = "List sub-categories",
    params(("category_id" = String, Path, description = "Category id")),
    responses(
        (status = 200, body = Vec<SubCategory>),
        (status = 404, body = ApiErrorResponse),
    )
)]
pub async fn get_sub_categories(
    Path(category_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Response<Vec<SubCategory>>, ApiError> {
    let sub_categories = state
        .service
        .get_sub_categories(RawId::Text(category_id))
        .await?;

    Ok(Response::OK(sub_categories))
}
