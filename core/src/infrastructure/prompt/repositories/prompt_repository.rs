use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, FromQueryResult,
};

use crate::domain::{
    common::{
        entities::app_errors::CoreError,
        pagination::{PageRequest, Paginated},
        query::{BuiltQuery, FilterQuery, FilterValue},
    },
    prompt::{
        entities::{Prompt, PromptDetails},
        ports::PromptRepository,
        value_objects::{CategoryUsage, NewPrompt, PromptActivity, PromptFilter},
    },
    user::value_objects::DailyActivity,
    validation::DateRange,
};
use crate::entity::prompts::{ActiveModel as PromptActiveModel, Entity as PromptEntity};
use crate::infrastructure::{
    db::{
        errors::{classify, internal},
        statement::{fetch_count, to_statement},
    },
    prompt::mappers::{ActivityTotalsRow, CategoryUsageRow, DailyActivityRow, PromptDetailsRow},
};

const DETAILS_COLUMNS: &str = "SELECT p.id, p.user_id, p.category_id, p.sub_category_id, \
     p.prompt, p.response, p.created_at, \
     u.name AS user_name, c.name AS category_name, sc.name AS sub_category_name, \
     CHAR_LENGTH(p.prompt)::BIGINT AS prompt_length, \
     CHAR_LENGTH(p.response)::BIGINT AS response_length";

const DETAILS_FROM: &str = " FROM prompts p \
     JOIN users u ON u.id = p.user_id \
     JOIN categories c ON c.id = p.category_id \
     LEFT JOIN sub_categories sc ON sc.id = p.sub_category_id";

const NEWEST_FIRST: &str = "p.created_at DESC, p.id DESC";

const PROMPT_COUNT: &str = "SELECT COUNT(*) AS count FROM prompts p";

fn details() -> FilterQuery {
    FilterQuery::new(format!("{DETAILS_COLUMNS}{DETAILS_FROM}"))
}

fn filtered(base: FilterQuery, filter: &PromptFilter) -> FilterQuery {
    base.eq("p.user_id", filter.user_id)
        .eq("p.category_id", filter.category_id)
        .eq("p.sub_category_id", filter.sub_category_id)
        .range("p.created_at", &filter.created)
}

/// The newest `per_user` prompts of each user, ranked inside one window query.
fn recent_for_users_query(user_ids: &[i32], per_user: i64) -> BuiltQuery {
    let ranked = FilterQuery::new(format!(
        "{DETAILS_COLUMNS}, ROW_NUMBER() OVER (PARTITION BY p.user_id ORDER BY {NEWEST_FIRST}) AS row_rank{DETAILS_FROM}"
    ))
    .any_of("p.user_id", user_ids)
    .build();

    let mut params = ranked.params;
    params.push(FilterValue::BigInt(per_user));

    BuiltQuery {
        sql: format!(
            "SELECT * FROM ({}) ranked WHERE ranked.row_rank <= ${} \
             ORDER BY ranked.user_id, ranked.created_at DESC, ranked.id DESC",
            ranked.sql,
            params.len()
        ),
        params,
    }
}

#[derive(Debug, Clone)]
pub struct PostgresPromptRepository {
    pub db: DatabaseConnection,
}

impl PostgresPromptRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn fetch_details(
        &self,
        query: BuiltQuery,
        context: &str,
    ) -> Result<Vec<PromptDetails>, CoreError> {
        let rows = PromptDetailsRow::find_by_statement(to_statement(query))
            .all(&self.db)
            .await
            .map_err(|e| internal(e, context))?;

        Ok(rows.into_iter().map(PromptDetails::from).collect())
    }
}

impl PromptRepository for PostgresPromptRepository {
    async fn create_prompt(&self, prompt: NewPrompt) -> Result<Prompt, CoreError> {
        let created = PromptActiveModel {
            user_id: Set(prompt.user_id),
            category_id: Set(prompt.category_id),
            sub_category_id: Set(prompt.sub_category_id),
            prompt: Set(prompt.prompt),
            response: Set(prompt.response),
            created_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            classify(
                e,
                "Failed to create prompt",
                "Prompt already exists",
                "category_id",
            )
        })?;

        Ok(Prompt::from(created))
    }

    async fn get_prompt(&self, prompt_id: i32) -> Result<Option<PromptDetails>, CoreError> {
        let query = details().eq("p.id", Some(prompt_id)).build();

        let row = PromptDetailsRow::find_by_statement(to_statement(query))
            .one(&self.db)
            .await
            .map_err(|e| internal(e, "Failed to get prompt"))?;

        Ok(row.map(PromptDetails::from))
    }

    async fn find_many(
        &self,
        filter: PromptFilter,
        page: PageRequest,
    ) -> Result<Paginated<PromptDetails>, CoreError> {
        let query = filtered(details(), &filter).order_by(NEWEST_FIRST);

        let total = fetch_count(&self.db, query.count(PROMPT_COUNT))
            .await
            .map_err(|e| internal(e, "Failed to count prompts"))?;
        let items = self
            .fetch_details(query.paginate(&page), "Failed to list prompts")
            .await?;

        Ok(Paginated::new(items, total, &page))
    }

    async fn count_prompts(&self, filter: PromptFilter) -> Result<i64, CoreError> {
        let query = filtered(FilterQuery::new(PROMPT_COUNT), &filter).build();

        fetch_count(&self.db, query)
            .await
            .map_err(|e| internal(e, "Failed to count prompts"))
    }

    async fn delete_prompt(&self, prompt_id: i32) -> Result<bool, CoreError> {
        let result = PromptEntity::delete_by_id(prompt_id)
            .exec(&self.db)
            .await
            .map_err(|e| internal(e, "Failed to delete prompt"))?;

        Ok(result.rows_affected > 0)
    }

    async fn usage_by_category(&self) -> Result<Vec<CategoryUsage>, CoreError> {
        let query = FilterQuery::new(
            "SELECT c.id AS category_id, c.name AS category_name, COUNT(p.id) AS prompt_count \
             FROM categories c LEFT JOIN prompts p ON p.category_id = c.id",
        )
        .group_by("c.id, c.name")
        .order_by("prompt_count DESC, c.name ASC")
        .build();

        let rows = CategoryUsageRow::find_by_statement(to_statement(query))
            .all(&self.db)
            .await
            .map_err(|e| internal(e, "Failed to aggregate prompts per category"))?;

        Ok(rows.into_iter().map(CategoryUsage::from).collect())
    }

    async fn recent_prompts(&self, limit: i64) -> Result<Vec<PromptDetails>, CoreError> {
        let query = details()
            .order_by(NEWEST_FIRST)
            .paginate(&PageRequest::new(1, limit));

        self.fetch_details(query, "Failed to list recent prompts")
            .await
    }

    async fn recent_for_users(
        &self,
        user_ids: Vec<i32>,
        per_user: i64,
    ) -> Result<Vec<PromptDetails>, CoreError> {
        self.fetch_details(
            recent_for_users_query(&user_ids, per_user),
            "Failed to list recent prompts per user",
        )
        .await
    }

    async fn activity_for_user(
        &self,
        user_id: i32,
        since: DateTime<Utc>,
    ) -> Result<PromptActivity, CoreError> {
        let totals_query = FilterQuery::new(
            "SELECT COUNT(*) AS total_prompts, COUNT(DISTINCT p.category_id) AS categories_used \
             FROM prompts p",
        )
        .eq("p.user_id", Some(user_id))
        .build();

        let totals = ActivityTotalsRow::find_by_statement(to_statement(totals_query))
            .one(&self.db)
            .await
            .map_err(|e| internal(e, "Failed to aggregate user prompts"))?;

        let daily_query = FilterQuery::new(
            "SELECT DATE(p.created_at AT TIME ZONE 'UTC') AS date, COUNT(*) AS count \
             FROM prompts p",
        )
        .eq("p.user_id", Some(user_id))
        .range(
            "p.created_at",
            &DateRange {
                start: Some(since),
                end: None,
            },
        )
        .group_by("DATE(p.created_at AT TIME ZONE 'UTC')")
        .order_by("date DESC")
        .build();

        let daily = DailyActivityRow::find_by_statement(to_statement(daily_query))
            .all(&self.db)
            .await
            .map_err(|e| internal(e, "Failed to aggregate daily activity"))?;

        let (total_prompts, categories_used) = totals
            .map(|t| (t.total_prompts, t.categories_used))
            .unwrap_or_default();

        Ok(PromptActivity {
            total_prompts,
            categories_used,
            recent_activity: daily.into_iter().map(DailyActivity::from).collect(),
        })
    }

    async fn export_prompts(&self) -> Result<Vec<PromptDetails>, CoreError> {
        let query = details().order_by(NEWEST_FIRST).build();

        self.fetch_details(query, "Failed to export prompts").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_applies_filters_in_order() {
        let filter = PromptFilter {
            user_id: Some(3),
            category_id: None,
            sub_category_id: Some(9),
            created: DateRange::default(),
        };

        let query = filtered(details(), &filter)
            .order_by(NEWEST_FIRST)
            .paginate(&PageRequest::new(2, 10));

        assert!(query.sql.ends_with(
            "WHERE p.user_id = $1 AND p.sub_category_id = $2 \
             ORDER BY p.created_at DESC, p.id DESC LIMIT $3 OFFSET $4"
        ));
        assert_eq!(
            query.params,
            vec![
                FilterValue::Int(3),
                FilterValue::Int(9),
                FilterValue::BigInt(10),
                FilterValue::BigInt(10),
            ]
        );
    }

    #[test]
    fn count_shares_the_filters() {
        let query = filtered(FilterQuery::new(PROMPT_COUNT), &PromptFilter::for_user(5)).build();
        assert_eq!(
            query.sql,
            "SELECT COUNT(*) AS count FROM prompts p WHERE p.user_id = $1"
        );
    }

    #[test]
    fn per_user_limit_is_the_last_parameter() {
        let query = recent_for_users_query(&[1, 2], 5);

        assert!(query.sql.contains("WHERE p.user_id IN ($1, $2)"));
        assert!(query.sql.contains("WHERE ranked.row_rank <= $3"));
        assert_eq!(query.params.last(), Some(&FilterValue::BigInt(5)));
    }
}
