use crate::domain::{
    category::{
        entities::{Category, CategoryWithSubCategories, SubCategory},
        value_objects::{CreateCategoryInput, CreateSubCategoryInput},
    },
    authentication::value_objects::Identity,
    common::entities::app_errors::CoreError,
    validation::RawId,
};

#[cfg_attr(test, mockall::automock)]
pub trait CategoryService: Send + Sync {
    fn get_categories(&self) -> impl Future<Output = Result<Vec<Category>, CoreError>> + Send;

    fn get_category(
        &self,
        category_id: RawId,
    ) -> impl Future<Output = Result<CategoryWithSubCategories, CoreError>> + Send;

    fn create_category(
        &self,
        input: CreateCategoryInput,
    ) -> impl Future<Output = Result<Category, CoreError>> + Send;

    fn delete_category(
        &self,
        identity: Identity,
        category_id: RawId,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn get_sub_categories(
        &self,
        category_id: RawId,
    ) -> impl Future<Output = Result<Vec<SubCategory>, CoreError>> + Send;

    fn create_sub_category(
        &self,
        input: CreateSubCategoryInput,
    ) -> impl Future<Output = Result<SubCategory, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait CategoryRepository: Send + Sync {
    /// Fails with `Duplicate` when the name is taken.
    fn create_category(
        &self,
        name: String,
    ) -> impl Future<Output = Result<Category, CoreError>> + Send;

    fn get_category(
        &self,
        category_id: i32,
    ) -> impl Future<Output = Result<Option<Category>, CoreError>> + Send;

    /// Ordered by name.
    fn list_categories(&self) -> impl Future<Output = Result<Vec<Category>, CoreError>> + Send;

    /// Returns `false` when nothing was deleted.
    fn delete_category(
        &self,
        category_id: i32,
    ) -> impl Future<Output = Result<bool, CoreError>> + Send;

    /// Fails with `Duplicate` when the category already has a sub-category of that name.
    fn create_sub_category(
        &self,
        name: String,
        category_id: i32,
    ) -> impl Future<Output = Result<SubCategory, CoreError>> + Send;

    fn get_sub_category(
        &self,
        sub_category_id: i32,
    ) -> impl Future<Output = Result<Option<SubCategory>, CoreError>> + Send;

    /// Ordered by name.
    fn list_sub_categories(
        &self,
        category_id: i32,
    ) -> impl Future<Output = Result<Vec<SubCategory>, CoreError>> + Send;

    fn count_categories(&self) -> impl Future<Output = Result<i64, CoreError>> + Send;

    fn count_sub_categories(&self) -> impl Future<Output = Result<i64, CoreError>> + Send;

    /// Newest category first.
    fn list_with_sub_categories(
        &self,
    ) -> impl Future<Output = Result<Vec<CategoryWithSubCategories>, CoreError>> + Send;
}
