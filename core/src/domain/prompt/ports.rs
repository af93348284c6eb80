use chrono::{DateTime, Utc};

use crate::domain::{
    authentication::value_objects::Identity,
    common::{
        entities::app_errors::CoreError,
        pagination::{PageRequest, Paginated},
    },
    prompt::{
        entities::{GeneratedPrompt, Prompt, PromptDetails},
        value_objects::{
            CategoryUsage, GeneratePromptInput, GetPromptsFilter, NewPrompt, PromptActivity,
            PromptFilter,
        },
    },
    validation::RawId,
};

#[cfg_attr(test, mockall::automock)]
pub trait PromptService: Send + Sync {
    /// Asks the model for a lesson and stores the prompt, falling back to a
    /// templated lesson when the model fails or times out.
    fn generate_prompt(
        &self,
        identity: Identity,
        input: GeneratePromptInput,
    ) -> impl Future<Output = Result<GeneratedPrompt, CoreError>> + Send;

    /// Admins see every prompt, everyone else only their own.
    fn get_prompts(
        &self,
        identity: Identity,
        filter: GetPromptsFilter,
    ) -> impl Future<Output = Result<Paginated<PromptDetails>, CoreError>> + Send;

    fn get_prompt(
        &self,
        identity: Identity,
        prompt_id: RawId,
    ) -> impl Future<Output = Result<PromptDetails, CoreError>> + Send;

    fn get_user_prompts(
        &self,
        identity: Identity,
        user_id: RawId,
        filter: GetPromptsFilter,
    ) -> impl Future<Output = Result<Paginated<PromptDetails>, CoreError>> + Send;

    fn delete_prompt(
        &self,
        identity: Identity,
        prompt_id: RawId,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait PromptRepository: Send + Sync {
    /// Fails with `Validation` when a referenced row does not exist.
    fn create_prompt(
        &self,
        prompt: NewPrompt,
    ) -> impl Future<Output = Result<Prompt, CoreError>> + Send;

    fn get_prompt(
        &self,
        prompt_id: i32,
    ) -> impl Future<Output = Result<Option<PromptDetails>, CoreError>> + Send;

    /// Newest first.
    fn find_many(
        &self,
        filter: PromptFilter,
        page: PageRequest,
    ) -> impl Future<Output = Result<Paginated<PromptDetails>, CoreError>> + Send;

    fn count_prompts(
        &self,
        filter: PromptFilter,
    ) -> impl Future<Output = Result<i64, CoreError>> + Send;

    /// Returns `false` when nothing was deleted.
    fn delete_prompt(&self, prompt_id: i32) -> impl Future<Output = Result<bool, CoreError>> + Send;

    /// Every category with its prompt count, busiest first.
    fn usage_by_category(
        &self,
    ) -> impl Future<Output = Result<Vec<CategoryUsage>, CoreError>> + Send;

    fn recent_prompts(
        &self,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<PromptDetails>, CoreError>> + Send;

    /// The newest `per_user` prompts of each listed user.
    fn recent_for_users(
        &self,
        user_ids: Vec<i32>,
        per_user: i64,
    ) -> impl Future<Output = Result<Vec<PromptDetails>, CoreError>> + Send;

    fn activity_for_user(
        &self,
        user_id: i32,
        since: DateTime<Utc>,
    ) -> impl Future<Output = Result<PromptActivity, CoreError>> + Send;

    /// Newest first.
    fn export_prompts(&self) -> impl Future<Output = Result<Vec<PromptDetails>, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    fn generate_lesson(
        &self,
        system_prompt: String,
        user_prompt: String,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}
