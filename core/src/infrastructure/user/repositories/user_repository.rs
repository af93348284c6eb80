use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, PaginatorTrait, QueryFilter,
};
use tracing::error;

use crate::domain::{
    common::{
        entities::app_errors::CoreError,
        pagination::{PageRequest, Paginated},
        query::FilterQuery,
    },
    user::{
        entities::{User, UserCredentials, UserRole, UserSummary},
        ports::UserRepository,
        value_objects::{NewUser, UserFilter},
    },
};
use crate::entity::users::{
    ActiveModel as UserActiveModel, Column as UserColumn, Entity as UserEntity,
};
use crate::infrastructure::{
    db::{
        errors::{classify, internal},
        statement::{fetch_count, to_statement},
    },
    user::mappers::UserSummaryRow,
};

const SUMMARY_SELECT: &str = "SELECT u.id, u.name, u.phone, u.role, u.created_at, u.updated_at, \
     COUNT(p.id) AS prompt_count \
     FROM users u LEFT JOIN prompts p ON p.user_id = u.id";

const SUMMARY_COUNT: &str = "SELECT COUNT(*) AS count FROM users u";

#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pub db: DatabaseConnection,
}

impl PostgresUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn summaries(filter: &UserFilter) -> FilterQuery {
        FilterQuery::new(SUMMARY_SELECT)
            .search(&["u.name", "u.phone"], filter.search.as_deref())
            .group_by("u.id")
            .order_by("u.created_at DESC, u.id DESC")
    }
}

impl UserRepository for PostgresUserRepository {
    async fn create_user(&self, user: NewUser) -> Result<User, CoreError> {
        let now = Utc::now().fixed_offset();

        let created = UserActiveModel {
            name: Set(user.name),
            phone: Set(user.phone),
            password_hash: Set(user.password_hash),
            role: Set(user.role.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            classify(
                e,
                "Failed to create user",
                "Phone number already exists",
                "phone",
            )
        })?;

        Ok(User::from(created))
    }

    async fn get_by_id(&self, user_id: i32) -> Result<Option<User>, CoreError> {
        let user = UserEntity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| internal(e, "Failed to get user by id"))?
            .map(User::from);

        Ok(user)
    }

    async fn get_credentials_by_phone(
        &self,
        phone: String,
    ) -> Result<Option<UserCredentials>, CoreError> {
        let credentials = UserEntity::find()
            .filter(UserColumn::Phone.eq(phone))
            .one(&self.db)
            .await
            .map_err(|e| internal(e, "Failed to get user by phone"))?
            .map(UserCredentials::from);

        Ok(credentials)
    }

    async fn update_role(&self, user_id: i32, role: UserRole) -> Result<User, CoreError> {
        let updated = UserActiveModel {
            id: Set(user_id),
            role: Set(role.as_str().to_string()),
            updated_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => CoreError::NotFound("User not found".to_string()),
            e => internal(e, "Failed to update user role"),
        })?;

        Ok(User::from(updated))
    }

    async fn delete_by_id(&self, user_id: i32) -> Result<bool, CoreError> {
        let result = UserEntity::delete_by_id(user_id)
            .exec(&self.db)
            .await
            .map_err(|e| internal(e, "Failed to delete user"))?;

        Ok(result.rows_affected > 0)
    }

    async fn find_many(
        &self,
        filter: UserFilter,
        page: PageRequest,
    ) -> Result<Paginated<UserSummary>, CoreError> {
        let query = Self::summaries(&filter);

        let total = fetch_count(&self.db, query.count(SUMMARY_COUNT))
            .await
            .map_err(|e| internal(e, "Failed to count users"))?;

        let rows = UserSummaryRow::find_by_statement(to_statement(query.paginate(&page)))
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to list users: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(Paginated::new(
            rows.into_iter().map(UserSummary::from).collect(),
            total,
            &page,
        ))
    }

    async fn count_users(&self, role: Option<UserRole>) -> Result<i64, CoreError> {
        let mut query = UserEntity::find();
        if let Some(role) = role {
            query = query.filter(UserColumn::Role.eq(role.as_str()));
        }

        let count = query
            .count(&self.db)
            .await
            .map_err(|e| internal(e, "Failed to count users"))?;

        Ok(count as i64)
    }

    async fn export_users(&self) -> Result<Vec<UserSummary>, CoreError> {
        let query = FilterQuery::new(SUMMARY_SELECT)
            .group_by("u.id")
            .order_by("u.id ASC")
            .build();

        let rows = UserSummaryRow::find_by_statement(to_statement(query))
            .all(&self.db)
            .await
            .map_err(|e| internal(e, "Failed to export users"))?;

        Ok(rows.into_iter().map(UserSummary::from).collect())
    }
}
