use axum::{
    Router, middleware,
    routing::{get, post},
};
use utoipa::OpenApi;

use super::handlers::{
    delete_prompt::{__path_delete_prompt, delete_prompt},
    generate_prompt::{__path_generate_prompt, generate_prompt},
    get_prompt::{__path_get_prompt, get_prompt},
    get_prompts::{__path_get_prompts, get_prompts},
    get_user_prompts::{__path_get_user_prompts, get_user_prompts},
};
use crate::application::{auth::auth, http::server::app_state::AppState};

#[derive(OpenApi)]
#[openapi(paths(
    generate_prompt,
    get_prompts,
    get_prompt,
    get_user_prompts,
    delete_prompt
))]
pub struct PromptApiDoc;

pub fn prompt_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(&format!("{root_path}/prompts"), get(get_prompts))
        .route(
            &format!("{root_path}/prompts/generate"),
            post(generate_prompt),
        )
        .route(
            &format!("{root_path}/prompts/user/{{user_id}}"),
            get(get_user_prompts),
        )
        .route(
            &format!("{root_path}/prompts/{{prompt_id}}"),
            get(get_prompt).delete(delete_prompt),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth))
}
