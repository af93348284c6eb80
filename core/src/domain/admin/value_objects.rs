use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    prompt::{entities::PromptDetails, value_objects::CategoryUsage},
    user::entities::UserSummary,
};

pub const RECENT_PROMPTS: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExportType {
    Users,
    Prompts,
    Categories,
}

impl ExportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportType::Users => "users",
            ExportType::Prompts => "prompts",
            ExportType::Categories => "categories",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv; charset=utf-8",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExportInput {
    pub export_type: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub content_type: &'static str,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DashboardTotals {
    pub users: i64,
    pub admins: i64,
    pub categories: i64,
    pub sub_categories: i64,
    pub prompts: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DashboardStats {
    pub totals: DashboardTotals,
    pub prompts_per_category: Vec<CategoryUsage>,
    pub recent_prompts: Vec<PromptDetails>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserWithHistory {
    #[serde(flatten)]
    pub summary: UserSummary,
    /// Newest first, at most [`RECENT_PROMPTS`].
    pub recent_prompts: Vec<PromptDetails>,
}
