use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::domain::{
    category::{
        entities::{Category, CategoryWithSubCategories, SubCategory},
        ports::CategoryRepository,
    },
    common::entities::app_errors::CoreError,
};
use crate::entity::{
    categories::{
        ActiveModel as CategoryActiveModel, Column as CategoryColumn, Entity as CategoryEntity,
    },
    sub_categories::{
        ActiveModel as SubCategoryActiveModel, Column as SubCategoryColumn,
        Entity as SubCategoryEntity,
    },
};
use crate::infrastructure::db::errors::{classify, internal};

#[derive(Debug, Clone)]
pub struct PostgresCategoryRepository {
    pub db: DatabaseConnection,
}

impl PostgresCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl CategoryRepository for PostgresCategoryRepository {
    async fn create_category(&self, name: String) -> Result<Category, CoreError> {
        let created = CategoryActiveModel {
            name: Set(name),
            created_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            classify(
                e,
                "Failed to create category",
                "Category name already exists",
                "name",
            )
        })?;

        Ok(Category::from(created))
    }

    async fn get_category(&self, category_id: i32) -> Result<Option<Category>, CoreError> {
        let category = CategoryEntity::find_by_id(category_id)
            .one(&self.db)
            .await
            .map_err(|e| internal(e, "Failed to get category"))?
            .map(Category::from);

        Ok(category)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, CoreError> {
        let categories = CategoryEntity::find()
            .order_by_asc(CategoryColumn::Name)
            .all(&self.db)
            .await
            .map_err(|e| internal(e, "Failed to list categories"))?
            .into_iter()
            .map(Category::from)
            .collect();

        Ok(categories)
    }

    async fn delete_category(&self, category_id: i32) -> Result<bool, CoreError> {
        let result = CategoryEntity::delete_by_id(category_id)
            .exec(&self.db)
            .await
            .map_err(|e| {
                classify(
                    e,
                    "Failed to delete category",
                    "Category name already exists",
                    "category_id",
                )
            })?;

        Ok(result.rows_affected > 0)
    }

    async fn create_sub_category(
        &self,
        name: String,
        category_id: i32,
    ) -> Result<SubCategory, CoreError> {
        let created = SubCategoryActiveModel {
            name: Set(name),
            category_id: Set(category_id),
            created_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            classify(
                e,
                "Failed to create sub-category",
                "Sub-category name already exists in this category",
                "category_id",
            )
        })?;

        Ok(SubCategory::from(created))
    }

    async fn get_sub_category(
        &self,
        sub_category_id: i32,
    ) -> Result<Option<SubCategory>, CoreError> {
        let sub_category = SubCategoryEntity::find_by_id(sub_category_id)
            .one(&self.db)
            .await
            .map_err(|e| internal(e, "Failed to get sub-category"))?
            .map(SubCategory::from);

        Ok(sub_category)
    }

    async fn list_sub_categories(&self, category_id: i32) -> Result<Vec<SubCategory>, CoreError> {
        let sub_categories = SubCategoryEntity::find()
            .filter(SubCategoryColumn::CategoryId.eq(category_id))
            .order_by_asc(SubCategoryColumn::Name)
            .all(&self.db)
            .await
            .map_err(|e| internal(e, "Failed to list sub-categories"))?
            .into_iter()
            .map(SubCategory::from)
            .collect();

        Ok(sub_categories)
    }

    async fn count_categories(&self) -> Result<i64, CoreError> {
        let count = CategoryEntity::find()
            .count(&self.db)
            .await
            .map_err(|e| internal(e, "Failed to count categories"))?;

        Ok(count as i64)
    }

    async fn count_sub_categories(&self) -> Result<i64, CoreError> {
        let count = SubCategoryEntity::find()
            .count(&self.db)
            .await
            .map_err(|e| internal(e, "Failed to count sub-categories"))?;

        Ok(count as i64)
    }

    async fn list_with_sub_categories(&self) -> Result<Vec<CategoryWithSubCategories>, CoreError> {
        let rows = CategoryEntity::find()
            .find_with_related(SubCategoryEntity)
            .order_by_desc(CategoryColumn::CreatedAt)
            .order_by_desc(CategoryColumn::Id)
            .order_by_asc(SubCategoryColumn::Name)
            .all(&self.db)
            .await
            .map_err(|e| internal(e, "Failed to list categories with sub-categories"))?;

        Ok(rows
            .into_iter()
            .map(|(category, sub_categories)| CategoryWithSubCategories {
                category: Category::from(category),
                sub_categories: sub_categories.into_iter().map(SubCategory::from).collect(),
            })
            .collect())
    }
}
