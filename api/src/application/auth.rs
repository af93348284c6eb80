use axum::{
    RequestPartsExt,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use learnhub_core::domain::{
    authentication::value_objects::Identity, common::entities::app_errors::CoreError,
    user::ports::UserService,
};

use super::http::server::{api_entities::api_error::ApiError, app_state::AppState};

const NO_TOKEN: &str = "No token provided";
const ADMIN_ONLY: &str = "You do not have permission to access this resource";

/// Why a presented bearer token could not be resolved.
/// Only `CoreError::Unauthenticated` becomes a 401; storage failures keep their own status.
#[derive(Debug, Clone)]
struct AuthFailure(CoreError);

pub async fn extract_token_from_bearer(parts: &mut Parts) -> Option<String> {
    let TypedHeader(Authorization(bearer)) = parts
        .extract::<TypedHeader<Authorization<Bearer>>>()
        .await
        .ok()?;

    Some(bearer.token().to_string())
}

/// Resolves an optional bearer token into an [`Identity`] stored in request extensions.
/// Requests without a token pass through untouched; extractors decide whether one is needed.
pub async fn auth(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    if let Some(token) = extract_token_from_bearer(&mut parts).await {
        match state.service.authorize_request(token).await {
            Ok(identity) => {
                parts.extensions.insert(identity);
            }
            Err(e) => {
                tracing::debug!("rejected bearer token: {e}");
                parts.extensions.insert(AuthFailure(e));
            }
        }
    }

    next.run(Request::from_parts(parts, body)).await
}

fn identity_from(parts: &Parts) -> Result<Identity, ApiError> {
    if let Some(identity) = parts.extensions.get::<Identity>() {
        return Ok(identity.clone());
    }

    match parts.extensions.get::<AuthFailure>() {
        Some(AuthFailure(error)) => Err(ApiError::from(error.clone())),
        None => Err(ApiError::Unauthorized(NO_TOKEN.to_string())),
    }
}

/// Any authenticated caller.
pub struct RequiredIdentity(pub Identity);

impl<S> FromRequestParts<S> for RequiredIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        identity_from(parts).map(RequiredIdentity)
    }
}

/// An authenticated caller holding the admin role.
pub struct RequiredAdmin(pub Identity);

impl<S> FromRequestParts<S> for RequiredAdmin
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        let identity = identity_from(parts)?;
        if !identity.is_admin() {
            return Err(ApiError::Forbidden(ADMIN_ONLY.to_string()));
        }

        Ok(RequiredAdmin(identity))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{self, StatusCode};
    use learnhub_core::domain::user::entities::UserRole;

    use super::*;

    fn parts() -> Parts {
        let (parts, _) = http::Request::builder()
            .uri("/users/me")
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    fn identity(role: UserRole) -> Identity {
        Identity {
            user_id: 7,
            name: "Dana Levi".to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn missing_identity_is_unauthorized() {
        let mut parts = parts();
        let Err(error) = RequiredIdentity::from_request_parts(&mut parts, &()).await else {
            panic!("expected a rejection");
        };
        assert_eq!(error, ApiError::Unauthorized(NO_TOKEN.to_string()));
    }

    #[tokio::test]
    async fn refused_token_reason_is_reported() {
        let mut parts = parts();
        parts
            .extensions
            .insert(AuthFailure(CoreError::Unauthenticated(
                "Token expired".to_string(),
            )));

        let Err(error) = RequiredIdentity::from_request_parts(&mut parts, &()).await else {
            panic!("expected a rejection");
        };
        assert_eq!(error.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(error.to_string(), "Token expired");
    }

    #[tokio::test]
    async fn storage_failure_during_token_check_is_internal() {
        let mut parts = parts();
        parts
            .extensions
            .insert(AuthFailure(CoreError::InternalServerError));

        let Err(error) = RequiredIdentity::from_request_parts(&mut parts, &()).await else {
            panic!("expected a rejection");
        };
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let mut parts = self::parts();
        parts
            .extensions
            .insert(AuthFailure(CoreError::InternalServerError));
        let Err(error) = RequiredAdmin::from_request_parts(&mut parts, &()).await else {
            panic!("expected a rejection");
        };
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn admin_extractor_checks_role() {
        let mut parts = parts();
        parts.extensions.insert(identity(UserRole::User));
        let Err(error) = RequiredAdmin::from_request_parts(&mut parts, &()).await else {
            panic!("expected a rejection");
        };
        assert_eq!(error.status(), StatusCode::FORBIDDEN);

        let mut parts = self::parts();
        parts.extensions.insert(identity(UserRole::Admin));
        let Ok(RequiredAdmin(admin)) = RequiredAdmin::from_request_parts(&mut parts, &()).await
        else {
            panic!("expected an admin");
        };
        assert_eq!(admin.user_id, 7);
    }

    #[tokio::test]
    async fn bearer_token_is_read_from_header() {
        let (mut parts, _) = http::Request::builder()
            .header("authorization", "Bearer abc.def.ghi")
            .body(())
            .unwrap()
            .into_parts();

        assert_eq!(
            extract_token_from_bearer(&mut parts).await.as_deref(),
            Some("abc.def.ghi")
        );
        assert_eq!(extract_token_from_bearer(&mut self::parts()).await, None);
    }
}
