use axum::{
    Router, middleware,
    routing::{get, post},
};
use utoipa::OpenApi;

use super::handlers::{
    create_category::{__path_create_category, create_category},
    create_sub_category::{__path_create_sub_category, create_sub_category},
    delete_category::{__path_delete_category, delete_category},
    get_categories::{__path_get_categories, get_categories},
    get_category::{__path_get_category, get_category},
    get_sub_categories::{__path_get_sub_categories, get_sub_categories},
};
use crate::application::{auth::auth, http::server::app_state::AppState};

#[derive(OpenApi)]
#[openapi(paths(
    get_categories,
    get_category,
    create_category,
    delete_category,
    get_sub_categories,
    create_sub_category
))]
pub struct CategoryApiDoc;

pub fn category_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(
            &format!("{root_path}/categories"),
            get(get_categories).post(create_category),
        )
        .route(
            &format!("{root_path}/categories/sub-categories"),
            post(create_sub_category),
        )
        .route(
            &format!("{root_path}/categories/{{category_id}}"),
            get(get_category).delete(delete_category),
        )
        .route(
            &format!("{root_path}/categories/{{category_id}}/sub-categories"),
            get(get_sub_categories),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
