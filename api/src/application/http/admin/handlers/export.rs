use axum::{
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use learnhub_core::domain::admin::{ports::AdminService, value_objects::ExportFile};

use crate::application::{
    auth::RequiredAdmin,
    http::{
        query_extractor::ListingQuery,
        query_params::ListingParams,
        server::{api_entities::api_error::{ApiError, ApiErrorResponse}, app_state::AppState},
    },
};

pub fn attachment(file: ExportFile) -> Result<Response, ApiError> {
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", file.filename))
        .map_err(|e| ApiError::InternalServerError(format!("invalid export filename: {e}")))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(file.content_type)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.body,
    )
        .into_response())
}

#[utoipa::path(
    get,
    path = "/export",
    tag = "admin",
    summary = "Export",
    description = "Downloads users, prompts or categories as JSON (default) or CSV.",
    security(("bearer" = [])),
    params(ListingParams),
    responses(
        (status = 200, description = "File attachment", content_type = "text/csv"),
        (status = 400, body = ApiErrorResponse),
        (status = 403, body = ApiErrorResponse),
    )
)]
pub async fn export(
    State(state): State<AppState>,
    RequiredAdmin(identity): RequiredAdmin,
    ListingQuery(params): ListingQuery,
) -> Result<Response, ApiError> {
    let file = state.service.export(identity, params.export_input()).await?;

    attachment(file)
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    #[tokio::test]
    async fn csv_is_served_as_attachment() {
        let response = attachment(ExportFile {
            filename: "users_export_20240501_093000.csv".to_string(),
            content_type: "text/csv; charset=utf-8",
            body: "id,name\n1,Dana\n".to_string(),
        })
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/csv; charset=utf-8"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"users_export_20240501_093000.csv\""
        );

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"id,name\n1,Dana\n");
    }
}
