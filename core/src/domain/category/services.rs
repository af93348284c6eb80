use tracing::instrument;

use crate::domain::{
    authentication::value_objects::Identity,
    category::{
        entities::{Category, CategoryWithSubCategories, SubCategory},
        ports::{CategoryRepository, CategoryService},
        value_objects::{CreateCategoryInput, CreateSubCategoryInput},
    },
    common::{
        entities::app_errors::CoreError,
        policies::{can_administer, ensure_policy},
        services::Service,
    },
    crypto::ports::HasherRepository,
    health::ports::HealthCheckRepository,
    jwt::ports::TokenRepository,
    prompt::ports::{LLMClient, PromptRepository},
    user::ports::UserRepository,
    validation::{IdKind, RawId, require_id, validate_category_name, validate_id},
};

impl<U, C, P, H, T, LLM, HC> Service<U, C, P, H, T, LLM, HC>
where
    U: UserRepository,
    C: CategoryRepository,
    P: PromptRepository,
    H: HasherRepository,
    T: TokenRepository,
    LLM: LLMClient,
    HC: HealthCheckRepository,
{
    async fn existing_category(&self, category_id: i32) -> Result<Category, CoreError> {
        self.category_repository
            .get_category(category_id)
            .await?
            .ok_or_else(|| CoreError::NotFound("Category not found".to_string()))
    }
}

impl<U, C, P, H, T, LLM, HC> CategoryService for Service<U, C, P, H, T, LLM, HC>
where
    U: UserRepository,
    C: CategoryRepository,
    P: PromptRepository,
    H: HasherRepository,
    T: TokenRepository,
    LLM: LLMClient,
    HC: HealthCheckRepository,
{
    async fn get_categories(&self) -> Result<Vec<Category>, CoreError> {
        self.category_repository.list_categories().await
    }

    #[instrument(skip(self))]
    async fn get_category(
        &self,
        category_id: RawId,
    ) -> Result<CategoryWithSubCategories, CoreError> {
        let category_id = validate_id(&category_id, IdKind::Category)?;
        let category = self.existing_category(category_id).await?;
        let sub_categories = self
            .category_repository
            .list_sub_categories(category.id)
            .await?;

        Ok(CategoryWithSubCategories {
            category,
            sub_categories,
        })
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    async fn create_category(&self, input: CreateCategoryInput) -> Result<Category, CoreError> {
        let name = validate_category_name(&input.name, "Category name")?;

        let category = self.category_repository.create_category(name).await?;

        tracing::info!(category_id = category.id, "Category created");

        Ok(category)
    }

    #[instrument(skip(self))]
    async fn delete_category(&self, identity: Identity, category_id: RawId) -> Result<(), CoreError> {
        ensure_policy(can_administer(&identity), "Admin access required")?;

        let category_id = validate_id(&category_id, IdKind::Category)?;

        if !self.category_repository.delete_category(category_id).await? {
            return Err(CoreError::NotFound("Category not found".to_string()));
        }

        tracing::info!(category_id, deleted_by = identity.user_id, "Category deleted");

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_sub_categories(&self, category_id: RawId) -> Result<Vec<SubCategory>, CoreError> {
        let category_id = validate_id(&category_id, IdKind::Category)?;
        let category = self.existing_category(category_id).await?;

        self.category_repository
            .list_sub_categories(category.id)
            .await
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    async fn create_sub_category(
        &self,
        input: CreateSubCategoryInput,
    ) -> Result<SubCategory, CoreError> {
        let (name, category_id) = match (
            validate_category_name(&input.name, "Sub-category name"),
            require_id(input.category_id.as_ref(), IdKind::Category),
        ) {
            (Ok(name), Ok(category_id)) => (name, category_id),
            (name, category_id) => {
                return Err(CoreError::Validation(
                    [name.err(), category_id.err()]
                        .into_iter()
                        .flatten()
                        .collect(),
                ));
            }
        };

        let category = self.existing_category(category_id).await?;
        let sub_category = self
            .category_repository
            .create_sub_category(name, category.id)
            .await?;

        tracing::info!(
            sub_category_id = sub_category.id,
            category_id = category.id,
            "Sub-category created"
        );

        Ok(sub_category)
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::{
        category::{
            ports::CategoryService,
            value_objects::{CreateCategoryInput, CreateSubCategoryInput},
        },
        common::entities::app_errors::CoreError,
        test_support::{admin_identity, service, user_identity},
        user::entities::UserRole,
        validation::RawId,
    };

    #[tokio::test]
    async fn category_and_sub_category_flow() {
        let fixture = service();

        let category = fixture
            .service
            .create_category(CreateCategoryInput {
                name: "Programming".to_string(),
            })
            .await
            .unwrap();
        let python = fixture
            .service
            .create_sub_category(CreateSubCategoryInput {
                name: "Python".to_string(),
                category_id: Some(RawId::from(category.id)),
            })
            .await
            .unwrap();
        assert_eq!(python.category_id, category.id);

        let subs = fixture
            .service
            .get_sub_categories(RawId::from(category.id.to_string().as_str()))
            .await
            .unwrap();
        assert!(subs.iter().any(|s| s.name == "Python"));

        let detailed = fixture
            .service
            .get_category(RawId::from(category.id))
            .await
            .unwrap();
        assert_eq!(detailed.category.name, "Programming");
        assert_eq!(detailed.sub_categories, vec![python]);
    }

    #[tokio::test]
    async fn categories_are_listed_by_name() {
        let fixture = service();
        for name in ["Science", "Art", "Math"] {
            fixture
                .service
                .create_category(CreateCategoryInput {
                    name: name.to_string(),
                })
                .await
                .unwrap();
        }

        let names: Vec<String> = fixture
            .service
            .get_categories()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Art", "Math", "Science"]);
    }

    #[tokio::test]
    async fn duplicate_category_name_is_rejected() {
        let fixture = service();
        let create = || {
            fixture.service.create_category(CreateCategoryInput {
                name: "Programming".to_string(),
            })
        };
        create().await.unwrap();

        assert!(matches!(create().await.unwrap_err(), CoreError::Duplicate(_)));
    }

    #[tokio::test]
    async fn sub_category_requires_existing_category() {
        let fixture = service();
        let error = fixture
            .service
            .create_sub_category(CreateSubCategoryInput {
                name: "Python".to_string(),
                category_id: Some(RawId::Number(77)),
            })
            .await
            .unwrap_err();
        assert_eq!(error, CoreError::NotFound("Category not found".to_string()));
    }

    #[tokio::test]
    async fn sub_category_reports_all_invalid_fields() {
        let fixture = service();
        let error = fixture
            .service
            .create_sub_category(CreateSubCategoryInput {
                name: "P".to_string(),
                category_id: None,
            })
            .await
            .unwrap_err();
        assert_eq!(error.field_errors().len(), 2);
    }

    #[tokio::test]
    async fn unknown_category_is_not_found() {
        let fixture = service();
        let error = fixture
            .service
            .get_sub_categories(RawId::Number(12))
            .await
            .unwrap_err();
        assert!(matches!(error, CoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn deleting_requires_admin_and_existing_category() {
        let fixture = service();
        let user = fixture.seed_user("Dana Levi", "0501234567", UserRole::User);
        let (category, _) = fixture.seed_category("Programming", "Python");

        let error = fixture
            .service
            .delete_category(user_identity(&user), RawId::from(category.id))
            .await
            .unwrap_err();
        assert!(matches!(error, CoreError::Forbidden(_)));

        fixture
            .service
            .delete_category(admin_identity(), RawId::from(category.id))
            .await
            .unwrap();

        let error = fixture
            .service
            .delete_category(admin_identity(), RawId::from(category.id))
            .await
            .unwrap_err();
        assert_eq!(error, CoreError::NotFound("Category not found".to_string()));
    }
}
