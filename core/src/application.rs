use crate::{
    domain::{
        common::{LearnHubConfig, services::Service},
        user::policies::RolePolicy,
    },
    infrastructure::{
        category::PostgresCategoryRepository,
        crypto::Argon2HasherRepository,
        db::postgres::{Postgres, PostgresConfig},
        health::PostgresHealthCheckRepository,
        jwt::JwtTokenRepository,
        llm::ChatCompletionClient,
        prompt::PostgresPromptRepository,
        user::PostgresUserRepository,
    },
};

pub type LearnHubService = Service<
    PostgresUserRepository,
    PostgresCategoryRepository,
    PostgresPromptRepository,
    Argon2HasherRepository,
    JwtTokenRepository,
    ChatCompletionClient,
    PostgresHealthCheckRepository,
>;

/// The wired service together with the database handle it was built on.
pub struct Application {
    pub service: LearnHubService,
    pub database: Postgres,
}

pub async fn create_service(config: LearnHubConfig) -> Result<Application, anyhow::Error> {
    let database = Postgres::new(PostgresConfig {
        database_url: config.database.url(),
    })
    .await?;

    let llm_client = ChatCompletionClient::new(&config.llm)?;
    let tokens = JwtTokenRepository::new(&config.auth.jwt_secret, config.auth.token_ttl_hours)?;

    let service = Service::new(
        PostgresUserRepository::new(database.get_db()),
        PostgresCategoryRepository::new(database.get_db()),
        PostgresPromptRepository::new(database.get_db()),
        Argon2HasherRepository::new(),
        tokens,
        llm_client,
        PostgresHealthCheckRepository::new(database.get_db()),
        RolePolicy::new(config.auth.admin_phone),
        config.prompt,
        config.llm.timeout,
    );

    Ok(Application { service, database })
}
