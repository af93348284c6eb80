use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Prompt {
    pub id: i32,
    pub user_id: i32,
    pub category_id: i32,
    /// Cleared when the sub-category is removed.
    pub sub_category_id: Option<i32>,
    pub prompt: String,
    pub response: String,
    pub created_at: DateTime<Utc>,
}

/// A prompt joined with the names it references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PromptDetails {
    #[serde(flatten)]
    pub prompt: Prompt,
    pub user_name: String,
    pub category_name: String,
    pub sub_category_name: Option<String>,
    pub prompt_length: i64,
    pub response_length: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GeneratedPrompt {
    #[serde(flatten)]
    pub prompt: Prompt,
    pub category_name: String,
    pub sub_category_name: String,
    /// Set when the lesson text is the local template rather than model output.
    pub used_fallback: bool,
}
