use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    common::{
        entities::app_errors::{CoreError, FieldError},
        pagination::PageRequest,
    },
    user::value_objects::DailyActivity,
    validation::{
        DateRange, IdKind, RawId, resolve_pagination, validate_date_range, validate_id,
    },
};

pub struct GeneratePromptInput {
    pub user_id: Option<RawId>,
    pub category_id: Option<RawId>,
    pub sub_category_id: Option<RawId>,
    pub prompt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPrompt {
    pub user_id: i32,
    pub category_id: i32,
    pub sub_category_id: Option<i32>,
    pub prompt: String,
    pub response: String,
}

/// Raw listing parameters as received from the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetPromptsFilter {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub user_id: Option<String>,
    pub category_id: Option<String>,
    pub sub_category_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptFilter {
    pub user_id: Option<i32>,
    pub category_id: Option<i32>,
    pub sub_category_id: Option<i32>,
    pub created: DateRange,
}

impl PromptFilter {
    pub fn for_user(user_id: i32) -> Self {
        Self {
            user_id: Some(user_id),
            ..Default::default()
        }
    }
}

fn optional_id(raw: &Option<String>, kind: IdKind) -> Option<Result<i32, FieldError>> {
    raw.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| validate_id(&RawId::Text(s.to_string()), kind))
}

impl GetPromptsFilter {
    /// Validates every parameter, reporting all failures together.
    pub fn resolve(&self) -> Result<(PromptFilter, PageRequest), CoreError> {
        let mut errors = Vec::new();

        let page = resolve_pagination(self.page.as_deref(), self.limit.as_deref())
            .map_err(|e| errors.extend(e))
            .ok();

        let mut id = |raw: &Option<String>, kind: IdKind| match optional_id(raw, kind) {
            Some(Ok(value)) => Some(value),
            Some(Err(e)) => {
                errors.push(e);
                None
            }
            None => None,
        };
        let user_id = id(&self.user_id, IdKind::User);
        let category_id = id(&self.category_id, IdKind::Category);
        let sub_category_id = id(&self.sub_category_id, IdKind::SubCategory);

        let created = validate_date_range(self.start_date.as_deref(), self.end_date.as_deref())
            .map_err(|e| errors.extend(e))
            .ok();

        match (page, created) {
            (Some(page), Some(created)) if errors.is_empty() => Ok((
                PromptFilter {
                    user_id,
                    category_id,
                    sub_category_id,
                    created,
                },
                page,
            )),
            _ => Err(CoreError::Validation(errors)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryUsage {
    pub category_id: i32,
    pub category_name: String,
    pub prompt_count: i64,
}

/// Aggregates of one user's prompts.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptActivity {
    pub total_prompts: i64,
    pub categories_used: i64,
    pub recent_activity: Vec<DailyActivity>,
}
