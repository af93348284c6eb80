use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response as AxumResponse},
};
use serde::Serialize;
use utoipa::ToSchema;

/// Successful response wrapped in `{ "success": true, "data": ... }`.
pub enum Response<T: Serialize> {
    OK(T),
    Created(T),
}

#[derive(Debug, Serialize)]
pub struct ApiSuccess<T> {
    pub success: bool,
    pub data: T,
}

#[derive(Debug, Serialize, ToSchema, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl<T: Serialize> IntoResponse for Response<T> {
    fn into_response(self) -> AxumResponse {
        let (status, data) = match self {
            Response::OK(data) => (StatusCode::OK, data),
            Response::Created(data) => (StatusCode::CREATED, data),
        };

        (
            status,
            Json(ApiSuccess {
                success: true,
                data,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    #[tokio::test]
    async fn created_wraps_data() {
        let response = Response::Created(MessageResponse::new("done")).into_response();
        assert_eq!(response.status(), StatusCode::CREATED);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({"success": true, "data": {"message": "done"}}));
    }
}
