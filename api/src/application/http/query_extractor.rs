use axum::{extract::FromRequestParts, http::request::Parts};

use super::{query_params::ListingParams, server::api_entities::api_error::ApiError};

/// Extractor for listing parameters that never fails on values, only on an undecodable query string.
///
/// ```ignore
/// async fn handler(ListingQuery(params): ListingQuery) -> Result<Response<_>, ApiError> {
///     let filter = params.prompts_filter();
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ListingQuery(pub ListingParams);

impl<S> FromRequestParts<S> for ListingQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query_string = parts.uri.query().unwrap_or("");
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query_string)
            .map_err(|e| ApiError::validation("query", format!("Invalid query string: {e}")))?;

        Ok(ListingQuery(ListingParams::from_pairs(pairs)))
    }
}
