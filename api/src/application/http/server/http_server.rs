use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::{
        HeaderValue, Method,
        header::{ACCEPT, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE},
    },
    middleware,
    response::Response,
    routing::get,
};
use axum_prometheus::PrometheusMetricLayer;
use learnhub_core::{
    application::create_service, domain::common::LearnHubConfig,
    infrastructure::db::postgres::Postgres,
};
use tower_http::cors::CorsLayer;
use tracing::{debug, info_span, warn};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    application::http::{
        admin::router::admin_routes,
        category::router::category_routes,
        health::router::health_routes,
        prompt::router::prompt_routes,
        server::{
            api_entities::api_error::reveal_internal_detail, app_state::AppState,
            openapi::ApiDoc,
        },
        user::router::user_routes,
    },
    args::Args,
};

/// Builds the service and returns the state together with the database handle to close on shutdown.
pub async fn state(args: Arc<Args>) -> Result<(AppState, Postgres), anyhow::Error> {
    let config = LearnHubConfig::try_from(args.as_ref().clone())?;
    let application = create_service(config).await?;

    Ok((
        AppState::new(args, application.service),
        application.database,
    ))
}

async fn expose_internal_errors(State(state): State<AppState>, response: Response) -> Response {
    if state.args.is_development() {
        reveal_internal_detail(response)
    } else {
        response
    }
}

fn allowed_origins(origins: &[String]) -> Vec<HeaderValue> {
    origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("ignoring invalid CORS origin {origin:?}");
                None
            }
        })
        .collect()
}

///  Returns the [`Router`] of this application.
pub fn router(state: AppState) -> Result<Router, anyhow::Error> {
    let trace_layer = tower_http::trace::TraceLayer::new_for_http().make_span_with(
        |request: &axum::extract::Request| {
            let uri: String = request.uri().to_string();
            info_span!("http_request", method = ?request.method(), uri)
        },
    );

    let allowed_origins = allowed_origins(&state.args.server.allowed_origins);
    debug!("Allowed origins: {:?}", allowed_origins);

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_origin(allowed_origins)
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, CONTENT_LENGTH, ACCEPT])
        .allow_credentials(true);

    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();

    let root_path = state.args.server.root_path.clone();

    let mut openapi = ApiDoc::openapi();
    openapi.paths.paths = openapi
        .paths
        .paths
        .into_iter()
        .map(|(path, item)| (format!("{root_path}{path}"), item))
        .collect();

    let router = Router::new()
        .merge(Scalar::with_url(
            format!("{root_path}/scalar"),
            openapi.clone(),
        ))
        .merge(
            SwaggerUi::new(format!("{root_path}/swagger-ui"))
                .url(format!("{root_path}/api-docs/openapi.json"), openapi),
        )
        .merge(user_routes(state.clone()))
        .merge(category_routes(state.clone()))
        .merge(prompt_routes(state.clone()))
        .merge(admin_routes(state.clone()))
        .merge(health_routes(&root_path))
        .route(
            &format!("{root_path}/metrics"),
            get(|| async move { metric_handle.render() }),
        )
        .layer(middleware::map_response_with_state(
            state.clone(),
            expose_internal_errors,
        ))
        .layer(trace_layer)
        .layer(cors)
        .layer(prometheus_layer)
        .with_state(state);

    Ok(router)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_origins_are_skipped() {
        let origins = allowed_origins(&[
            "http://localhost:5173".to_string(),
            "bad\norigin".to_string(),
        ]);
        assert_eq!(origins, vec![HeaderValue::from_static("http://localhost:5173")]);
    }
}
