use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use learnhub_core::domain::common::entities::app_errors::{CoreError, FieldError};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

const INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("{message}")]
    Validation {
        message: String,
        details: Vec<FieldError>,
    },

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Duplicate(String),

    #[error("{0}")]
    ExternalService(String),

    #[error("{0}")]
    InternalServerError(String),
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// The text behind a 500, attached to the response so development builds can show it.
#[derive(Debug, Clone)]
pub struct InternalErrorDetail(pub String);

impl ApiError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        let details = vec![FieldError::new(field, message)];
        ApiError::Validation {
            message: join_messages(&details),
            details,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } | ApiError::Duplicate(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::ExternalService(_) => StatusCode::BAD_GATEWAY,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "ValidationError",
            ApiError::NotFound(_) => "NotFoundError",
            ApiError::Unauthorized(_) => "AuthenticationError",
            ApiError::Forbidden(_) => "AuthorizationError",
            ApiError::Duplicate(_) => "DuplicateError",
            ApiError::ExternalService(_) => "ExternalServiceError",
            ApiError::InternalServerError(_) => "InternalError",
        }
    }
}

fn join_messages(details: &[FieldError]) -> String {
    details
        .iter()
        .map(|d| d.message.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(details) => ApiError::Validation {
                message: join_messages(&details),
                details,
            },
            CoreError::NotFound(message) => ApiError::NotFound(message),
            CoreError::Unauthenticated(message) => ApiError::Unauthorized(message),
            CoreError::Forbidden(message) => ApiError::Forbidden(message),
            CoreError::Duplicate(message) => ApiError::Duplicate(message),
            CoreError::ExternalServiceError(message) => ApiError::ExternalService(message),
            CoreError::InternalServerError => {
                ApiError::InternalServerError(INTERNAL_MESSAGE.to_string())
            }
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut details: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{field} is invalid"));
                    FieldError::new(field.to_string(), message)
                })
            })
            .collect();
        details.sort_by(|a, b| a.field.cmp(&b.field));

        ApiError::Validation {
            message: join_messages(&details),
            details,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation("body", rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.kind();

        let (message, details, internal) = match self {
            ApiError::Validation { message, details } => (message, Some(details), None),
            ApiError::InternalServerError(detail) => {
                tracing::error!(status = status.as_u16(), "{detail}");
                (INTERNAL_MESSAGE.to_string(), None, Some(detail))
            }
            other => (other.to_string(), None, None),
        };

        let mut response = (
            status,
            Json(ApiErrorResponse {
                success: false,
                error: error.to_string(),
                message,
                details,
            }),
        )
            .into_response();

        if let Some(detail) = internal {
            response.extensions_mut().insert(InternalErrorDetail(detail));
        }

        response
    }
}

/// Replaces the generic 500 message with the recorded detail.
pub fn reveal_internal_detail(mut response: Response) -> Response {
    let Some(InternalErrorDetail(detail)) = response.extensions_mut().remove::<InternalErrorDetail>() else {
        return response;
    };

    (
        response.status(),
        Json(ApiErrorResponse {
            success: false,
            error: "InternalError".to_string(),
            message: detail,
            details: None,
        }),
    )
        .into_response()
}

/// JSON body extractor that runs `validator` rules before the handler sees the payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidateJson(value))
    }
}
