use learnhub_core::domain::validation::RawId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryValidator {
    #[serde(default)]
    #[validate(length(max = 200, message = "Category name is too long"))]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateSubCategoryValidator {
    #[serde(default)]
    #[validate(length(max = 200, message = "Sub-category name is too long"))]
    pub name: String,

    /// Accepts a number or a numeric string.
    #[serde(default)]
    pub category_id: Option<RawId>,
}
