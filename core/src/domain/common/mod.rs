use std::time::Duration;

use crate::domain::validation::PromptRules;

pub mod entities;
pub mod pagination;
pub mod policies;
pub mod query;
pub mod services;

#[derive(Clone, Debug)]
pub struct LearnHubConfig {
    pub database: DatabaseConfig,
    pub llm: LLMConfig,
    pub auth: AuthConfig,
    pub prompt: PromptRules,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub name: String,
}

impl DatabaseConfig {
    pub fn url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.name
        )
    }
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    /// Upper bound for a single completion call, fallback text is used past it.
    pub timeout: Duration,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    /// Phone number granted the admin role on registration and login.
    pub admin_phone: Option<String>,
}
