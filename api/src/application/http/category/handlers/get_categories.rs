use axum::extract::State;
use learnhub_core::domain::category::{entities::Category, ports::CategoryService};

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[utoipa::path(
    get,
    path = "",
    tag = "category",
    summary = "List categories",
    description = "Every category, ordered by name.",
    responses((status = 200, body = Vec<Category>))
)]
pub async fn get_categories(
    State(state): State<AppState>,
) -> Result<Response<Vec<Category>>, ApiError> {
    let categories = state.service.get_categories().await?;

    Ok(Response::OK(categories))
}
