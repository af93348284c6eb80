use std::{sync::Arc, time::Duration};

use crate::domain::{
    category::ports::CategoryRepository, crypto::ports::HasherRepository,
    health::ports::HealthCheckRepository, jwt::ports::TokenRepository,
    prompt::ports::{LLMClient, PromptRepository},
    user::{policies::RolePolicy, ports::UserRepository},
    validation::PromptRules,
};

/// Every domain service is implemented on this one struct, generic over its ports.
pub struct Service<U, C, P, H, T, LLM, HC>
where
    U: UserRepository,
    C: CategoryRepository,
    P: PromptRepository,
    H: HasherRepository,
    T: TokenRepository,
    LLM: LLMClient,
    HC: HealthCheckRepository,
{
    pub(crate) user_repository: Arc<U>,
    pub(crate) category_repository: Arc<C>,
    pub(crate) prompt_repository: Arc<P>,
    pub(crate) hasher_repository: Arc<H>,
    pub(crate) token_repository: Arc<T>,
    pub(crate) llm_client: Arc<LLM>,
    pub(crate) health_check_repository: Arc<HC>,
    pub(crate) role_policy: RolePolicy,
    pub(crate) prompt_rules: PromptRules,
    pub(crate) llm_timeout: Duration,
}

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
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repository: U,
        category_repository: C,
        prompt_repository: P,
        hasher_repository: H,
        token_repository: T,
        llm_client: LLM,
        health_check_repository: HC,
        role_policy: RolePolicy,
        prompt_rules: PromptRules,
        llm_timeout: Duration,
    ) -> Self {
        Self {
            user_repository: Arc::new(user_repository),
            category_repository: Arc::new(category_repository),
            prompt_repository: Arc::new(prompt_repository),
            hasher_repository: Arc::new(hasher_repository),
            token_repository: Arc::new(token_repository),
            llm_client: Arc::new(llm_client),
            health_check_repository: Arc::new(health_check_repository),
            role_policy,
            prompt_rules,
            llm_timeout,
        }
    }
}

impl<U, C, P, H, T, LLM, HC> Clone for Service<U, C, P, H, T, LLM, HC>
where
    U: UserRepository,
    C: CategoryRepository,
    P: PromptRepository,
    H: HasherRepository,
    T: TokenRepository,
    LLM: LLMClient,
    HC: HealthCheckRepository,
{
    fn clone(&self) -> Self {
        Self {
            user_repository: Arc::clone(&self.user_repository),
            category_repository: Arc::clone(&self.category_repository),
            prompt_repository: Arc::clone(&self.prompt_repository),
            hasher_repository: Arc::clone(&self.hasher_repository),
            token_repository: Arc::clone(&self.token_repository),
            llm_client: Arc::clone(&self.llm_client),
            health_check_repository: Arc::clone(&self.health_check_repository),
            role_policy: self.role_policy.clone(),
            prompt_rules: self.prompt_rules.clone(),
            llm_timeout: self.llm_timeout,
        }
    }
}
