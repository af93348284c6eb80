use learnhub_core::domain::validation::RawId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct GeneratePromptValidator {
    /// Must be the caller unless the caller is an admin.
    #[serde(default)]
    pub user_id: Option<RawId>,

    #[serde(default)]
    pub category_id: Option<RawId>,

    #[serde(default)]
    pub sub_category_id: Option<RawId>,

    #[serde(default)]
    #[validate(length(max = 20000, message = "Prompt is too long"))]
    pub prompt: Option<String>,
}
