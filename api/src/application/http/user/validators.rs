use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterUserValidator {
    #[serde(default)]
    #[validate(length(max = 200, message = "Name is too long"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 32, message = "Phone number is too long"))]
    pub phone: String,

    #[serde(default)]
    #[validate(length(max = 256, message = "Password is too long"))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginValidator {
    #[serde(default)]
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}
