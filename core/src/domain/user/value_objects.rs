use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::user::entities::UserRole;

pub struct RegisterUserInput {
    pub name: String,
    pub phone: String,
    pub password: String,
}

pub struct LoginInput {
    pub phone: String,
    pub password: String,
}

/// A validated, hashed registration ready for storage.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub phone: String,
    pub password_hash: String,
    pub role: UserRole,
}

/// Raw listing parameters as received from the query string.
#[derive(Debug, Clone, Default)]
pub struct GetUsersFilter {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserAnalytics {
    pub user_id: i32,
    pub total_prompts: i64,
    pub categories_used: i64,
    /// Prompts per day over the last 30 days, newest first.
    pub recent_activity: Vec<DailyActivity>,
    pub avg_prompts_per_day: f64,
}

pub const ACTIVITY_WINDOW_DAYS: i64 = 30;
