use axum::{Router, middleware, routing::get};
use utoipa::OpenApi;

use super::handlers::{
    export::{__path_export, export},
    get_all_prompts::{__path_get_all_prompts, get_all_prompts},
    get_dashboard::{__path_get_dashboard, get_dashboard},
    get_users_with_history::{__path_get_users_with_history, get_users_with_history},
};
use crate::application::{auth::auth, http::server::app_state::AppState};

#[derive(OpenApi)]
#[openapi(paths(get_dashboard, get_users_with_history, get_all_prompts, export))]
pub struct AdminApiDoc;

pub fn admin_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(&format!("{root_path}/admin/dashboard"), get(get_dashboard))
        .route(
            &format!("{root_path}/admin/users"),
            get(get_users_with_history),
        )
        .route(&format!("{root_path}/admin/prompts"), get(get_all_prompts))
        .route(&format!("{root_path}/admin/export"), get(export))
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
