use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::FromQueryResult;

use crate::domain::{
    prompt::{
        entities::{Prompt, PromptDetails},
        value_objects::CategoryUsage,
    },
    user::value_objects::DailyActivity,
};
use crate::entity::prompts::Model as PromptModel;

impl From<PromptModel> for Prompt {
    fn from(model: PromptModel) -> Self {
        Prompt {
            id: model.id,
            user_id: model.user_id,
            category_id: model.category_id,
            sub_category_id: model.sub_category_id,
            prompt: model.prompt,
            response: model.response,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

/// A prompt joined with its owner and topic names.
#[derive(Debug, FromQueryResult)]
pub struct PromptDetailsRow {
    pub id: i32,
    pub user_id: i32,
    pub category_id: i32,
    pub sub_category_id: Option<i32>,
    pub prompt: String,
    pub response: String,
    pub created_at: DateTime<Utc>,
    pub user_name: String,
    pub category_name: String,
    pub sub_category_name: Option<String>,
    pub prompt_length: i64,
    pub response_length: i64,
}

impl From<PromptDetailsRow> for PromptDetails {
    fn from(row: PromptDetailsRow) -> Self {
        PromptDetails {
            prompt: Prompt {
                id: row.id,
                user_id: row.user_id,
                category_id: row.category_id,
                sub_category_id: row.sub_category_id,
                prompt: row.prompt,
                response: row.response,
                created_at: row.created_at,
            },
            user_name: row.user_name,
            category_name: row.category_name,
            sub_category_name: row.sub_category_name,
            prompt_length: row.prompt_length,
            response_length: row.response_length,
        }
    }
}

#[derive(Debug, FromQueryResult)]
pub struct CategoryUsageRow {
    pub category_id: i32,
    pub category_name: String,
    pub prompt_count: i64,
}

impl From<CategoryUsageRow> for CategoryUsage {
    fn from(row: CategoryUsageRow) -> Self {
        CategoryUsage {
            category_id: row.category_id,
            category_name: row.category_name,
            prompt_count: row.prompt_count,
        }
    }
}

#[derive(Debug, FromQueryResult)]
pub struct DailyActivityRow {
    pub date: NaiveDate,
    pub count: i64,
}

impl From<DailyActivityRow> for DailyActivity {
    fn from(row: DailyActivityRow) -> Self {
        DailyActivity {
            date: row.date,
            count: row.count,
        }
    }
}

#[derive(Debug, FromQueryResult)]
pub struct ActivityTotalsRow {
    pub total_prompts: i64,
    pub categories_used: i64,
}
