use axum::{
    Router, middleware,
    routing::{get, post},
};
use utoipa::OpenApi;

use super::handlers::{
    delete_user::{__path_delete_user, delete_user},
    get_me::{__path_get_me, get_me},
    get_user::{__path_get_user, get_user},
    get_user_analytics::{__path_get_user_analytics, get_user_analytics},
    get_user_history::{__path_get_user_history, get_user_history},
    get_users::{__path_get_users, get_users},
    login::{__path_login, login},
    register::{__path_register, register},
};
use crate::application::{auth::auth, http::server::app_state::AppState};

#[derive(OpenApi)]
#[openapi(paths(
    register,
    login,
    get_me,
    get_users,
    get_user,
    get_user_history,
    get_user_analytics,
    delete_user
))]
pub struct UserApiDoc;

pub fn user_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(&format!("{root_path}/users/register"), post(register))
        .route(&format!("{root_path}/users/login"), post(login))
        .route(&format!("{root_path}/users/me"), get(get_me))
        .route(&format!("{root_path}/users"), get(get_users))
        .route(
            &format!("{root_path}/users/{{user_id}}"),
            get(get_user).delete(delete_user),
        )
        .route(
            &format!("{root_path}/users/{{user_id}}/history"),
            get(get_user_history),
        )
        .route(
            &format!("{root_path}/users/{{user_id}}/analytics"),
            get(get_user_analytics),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
