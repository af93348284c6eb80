use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::application::http::{
    admin::router::AdminApiDoc, category::router::CategoryApiDoc, health::router::HealthApiDoc,
    prompt::router::PromptApiDoc, user::router::UserApiDoc,
};

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LearnHub API"
    ),
    modifiers(&BearerAuth),
    nest(
        (path = "/users", api = UserApiDoc),
        (path = "/categories", api = CategoryApiDoc),
        (path = "/prompts", api = PromptApiDoc),
        (path = "/admin", api = AdminApiDoc),
        (path = "/health", api = HealthApiDoc),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_area() {
        let doc = ApiDoc::openapi();
        for path in [
            "/users/register",
            "/users/{user_id}/analytics",
            "/categories/{category_id}/sub-categories",
            "/prompts/generate",
            "/admin/export",
            "/health/ready",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
