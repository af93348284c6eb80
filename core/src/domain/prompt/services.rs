use tracing::instrument;

use crate::domain::{
    authentication::value_objects::Identity,
    category::ports::CategoryRepository,
    common::{
        entities::app_errors::CoreError,
        pagination::Paginated,
        policies::{can_access_user, ensure_policy},
        services::Service,
    },
    crypto::ports::HasherRepository,
    health::ports::HealthCheckRepository,
    jwt::ports::TokenRepository,
    prompt::{
        entities::{GeneratedPrompt, PromptDetails},
        lesson::{fallback_lesson, system_prompt},
        ports::{LLMClient, PromptRepository, PromptService},
        value_objects::{GeneratePromptInput, GetPromptsFilter, NewPrompt, PromptFilter},
    },
    user::ports::UserRepository,
    validation::{IdKind, RawId, require_id, validate_id, validate_prompt_text},
};

const INVALID_TOPIC: &str = "Invalid category or sub-category";

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
    /// Calls the model within the configured timeout. `None` means the fallback must be used.
    async fn request_lesson(&self, system: String, prompt: String) -> Option<String> {
        let call = self.llm_client.generate_lesson(system, prompt);

        match tokio::time::timeout(self.llm_timeout, call).await {
            Ok(Ok(text)) if !text.trim().is_empty() => Some(text),
            Ok(Ok(_)) => {
                tracing::warn!("LLM returned an empty lesson, using fallback");
                None
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "LLM request failed, using fallback");
                None
            }
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.llm_timeout.as_millis() as u64,
                    "LLM request timed out, using fallback"
                );
                None
            }
        }
    }

    async fn owned_prompt(
        &self,
        identity: &Identity,
        prompt_id: &RawId,
    ) -> Result<PromptDetails, CoreError> {
        let prompt_id = validate_id(prompt_id, IdKind::Prompt)?;

        let prompt = self
            .prompt_repository
            .get_prompt(prompt_id)
            .await?
            .ok_or_else(|| CoreError::NotFound("Prompt not found".to_string()))?;

        ensure_policy(
            can_access_user(identity, prompt.prompt.user_id),
            "You can only access your own prompts",
        )?;

        Ok(prompt)
    }
}

impl<U, C, P, H, T, LLM, HC> PromptService for Service<U, C, P, H, T, LLM, HC>
where
    U: UserRepository,
    C: CategoryRepository,
    P: PromptRepository,
    H: HasherRepository,
    T: TokenRepository,
    LLM: LLMClient,
    HC: HealthCheckRepository,
{
    #[instrument(skip(self, input), fields(user_id = identity.user_id))]
    async fn generate_prompt(
        &self,
        identity: Identity,
        input: GeneratePromptInput,
    ) -> Result<GeneratedPrompt, CoreError> {
        let (user_id, category_id, sub_category_id, text) = match (
            require_id(input.user_id.as_ref(), IdKind::User),
            require_id(input.category_id.as_ref(), IdKind::Category),
            require_id(input.sub_category_id.as_ref(), IdKind::SubCategory),
            validate_prompt_text(input.prompt.as_deref().unwrap_or_default(), &self.prompt_rules),
        ) {
            (Ok(user_id), Ok(category_id), Ok(sub_category_id), Ok(text)) => {
                (user_id, category_id, sub_category_id, text)
            }
            (user_id, category_id, sub_category_id, text) => {
                return Err(CoreError::Validation(
                    [
                        user_id.err(),
                        category_id.err(),
                        sub_category_id.err(),
                        text.err(),
                    ]
                    .into_iter()
                    .flatten()
                    .collect(),
                ));
            }
        };

        ensure_policy(
            can_access_user(&identity, user_id),
            "You can only generate lessons for your own account",
        )?;

        self.user_repository
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| CoreError::NotFound("User not found".to_string()))?;

        let category = self
            .category_repository
            .get_category(category_id)
            .await?
            .ok_or_else(|| CoreError::validation("category_id", INVALID_TOPIC))?;

        let sub_category = self
            .category_repository
            .get_sub_category(sub_category_id)
            .await?
            .filter(|sub_category| sub_category.category_id == category.id)
            .ok_or_else(|| CoreError::validation("sub_category_id", INVALID_TOPIC))?;

        let system = system_prompt(&category.name, &sub_category.name);
        let (response, used_fallback) = match self.request_lesson(system, text.clone()).await {
            Some(lesson) => (lesson, false),
            None => (
                fallback_lesson(&text, &category.name, &sub_category.name),
                true,
            ),
        };

        let prompt = self
            .prompt_repository
            .create_prompt(NewPrompt {
                user_id,
                category_id: category.id,
                sub_category_id: Some(sub_category.id),
                prompt: text,
                response,
            })
            .await?;

        tracing::info!(
            prompt_id = prompt.id,
            category_id = category.id,
            sub_category_id = sub_category.id,
            used_fallback,
            "Lesson generated"
        );

        Ok(GeneratedPrompt {
            prompt,
            category_name: category.name,
            sub_category_name: sub_category.name,
            used_fallback,
        })
    }

    #[instrument(skip(self))]
    async fn get_prompts(
        &self,
        identity: Identity,
        filter: GetPromptsFilter,
    ) -> Result<Paginated<PromptDetails>, CoreError> {
        let (mut filter, page) = filter.resolve()?;

        if !identity.is_admin() {
            match filter.user_id {
                Some(user_id) if user_id != identity.user_id => {
                    return Err(CoreError::Forbidden(
                        "You can only access your own prompts".to_string(),
                    ));
                }
                _ => filter.user_id = Some(identity.user_id),
            }
        }

        self.prompt_repository.find_many(filter, page).await
    }

    #[instrument(skip(self))]
    async fn get_prompt(
        &self,
        identity: Identity,
        prompt_id: RawId,
    ) -> Result<PromptDetails, CoreError> {
        self.owned_prompt(&identity, &prompt_id).await
    }

    #[instrument(skip(self))]
    async fn get_user_prompts(
        &self,
        identity: Identity,
        user_id: RawId,
        filter: GetPromptsFilter,
    ) -> Result<Paginated<PromptDetails>, CoreError> {
        let user_id = validate_id(&user_id, IdKind::User)?;
        ensure_policy(
            can_access_user(&identity, user_id),
            "You can only access your own prompts",
        )?;

        let (filter, page) = GetPromptsFilter {
            user_id: None,
            ..filter
        }
        .resolve()?;

        self.prompt_repository
            .find_many(
                PromptFilter {
                    user_id: Some(user_id),
                    ..filter
                },
                page,
            )
            .await
    }

    #[instrument(skip(self))]
    async fn delete_prompt(&self, identity: Identity, prompt_id: RawId) -> Result<(), CoreError> {
        let prompt = self.owned_prompt(&identity, &prompt_id).await?;

        if !self.prompt_repository.delete_prompt(prompt.prompt.id).await? {
            return Err(CoreError::NotFound("Prompt not found".to_string()));
        }

        tracing::info!(
            prompt_id = prompt.prompt.id,
            deleted_by = identity.user_id,
            "Prompt deleted"
        );

        Ok(())
    }
}
