use crate::domain::{
    category::ports::CategoryRepository,
    common::{entities::app_errors::CoreError, services::Service},
    crypto::ports::HasherRepository,
    health::{
        entities::DatabaseHealthStatus,
        ports::{HealthCheckRepository, HealthCheckService},
    },
    jwt::ports::TokenRepository,
    prompt::ports::{LLMClient, PromptRepository},
    user::ports::UserRepository,
};

impl<U, C, P, H, T, LLM, HC> HealthCheckService for Service<U, C, P, H, T, LLM, HC>
where
    U: UserRepository,
    C: CategoryRepository,
    P: PromptRepository,
    H: HasherRepository,
    T: TokenRepository,
    LLM: LLMClient,
    HC: HealthCheckRepository,
{
    async fn readness(&self) -> Result<DatabaseHealthStatus, CoreError> {
        self.health_check_repository.readness().await
    }

    async fn health(&self) -> Result<u64, CoreError> {
        self.health_check_repository.health().await
    }
}
