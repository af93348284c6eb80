use std::time::Duration;

use anyhow::ensure;
use clap::{Args as ClapArgs, Parser, ValueEnum};
use learnhub_core::domain::{
    common::{AuthConfig, DatabaseConfig, LLMConfig, LearnHubConfig},
    validation::PromptRules,
};

/// Ten years.
const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365 * 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "learnhub", about = "LearnHub API server")]
pub struct Args {
    #[arg(long, env = "ENV", value_enum, default_value = "development")]
    pub env: Environment,

    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub database: DatabaseArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub auth: AuthArgs,

    #[command(flatten)]
    pub prompt: PromptArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

impl Args {
    pub fn is_development(&self) -> bool {
        self.env == Environment::Development
    }
}

#[derive(Debug, Clone, ClapArgs)]
#[command(next_help_heading = "Server")]
pub struct ServerArgs {
    #[arg(id = "server_host", long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(id = "server_port", long = "server-port", env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Prefix for every route, e.g. `/api`.
    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, ClapArgs)]
#[command(next_help_heading = "Database")]
pub struct DatabaseArgs {
    #[arg(id = "database_host", long = "database-host", env = "DATABASE_HOST", default_value = "localhost")]
    pub host: String,

    #[arg(id = "database_port", long = "database-port", env = "DATABASE_PORT", default_value_t = 5432)]
    pub port: u16,

    #[arg(long = "database-user", env = "DATABASE_USER", default_value = "postgres")]
    pub user: String,

    #[arg(
        long = "database-password",
        env = "DATABASE_PASSWORD",
        default_value = "postgres",
        hide_env_values = true
    )]
    pub password: String,

    #[arg(long = "database-name", env = "DATABASE_NAME", default_value = "learnhub")]
    pub name: String,
}

#[derive(Debug, Clone, ClapArgs)]
#[command(next_help_heading = "LLM")]
pub struct LlmArgs {
    #[arg(long = "llm-api-key", env = "OPENAI_API_KEY", default_value = "", hide_env_values = true)]
    pub api_key: String,

    #[arg(
        long = "llm-base-url",
        env = "LLM_BASE_URL",
        default_value = "https://api.openai.com/v1"
    )]
    pub base_url: String,

    #[arg(long = "llm-model", env = "LLM_MODEL", default_value = "gpt-3.5-turbo")]
    pub model: String,

    #[arg(long = "llm-timeout-seconds", env = "LLM_TIMEOUT_SECONDS", default_value_t = 30)]
    pub timeout_seconds: u64,

    #[arg(long = "llm-max-tokens", env = "LLM_MAX_TOKENS", default_value_t = 1000)]
    pub max_tokens: u32,

    #[arg(long = "llm-temperature", env = "LLM_TEMPERATURE", default_value_t = 0.7)]
    pub temperature: f32,
}

#[derive(Debug, Clone, ClapArgs)]
#[command(next_help_heading = "Auth")]
pub struct AuthArgs {
    #[arg(long = "jwt-secret", env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    #[arg(long = "token-ttl-hours", env = "TOKEN_TTL_HOURS", default_value_t = 24)]
    pub token_ttl_hours: i64,

    #[arg(long = "admin-phone", env = "ADMIN_PHONE")]
    pub admin_phone: Option<String>,
}

#[derive(Debug, Clone, ClapArgs)]
#[command(next_help_heading = "Prompt")]
pub struct PromptArgs {
    #[arg(
        long = "prompt-max-length",
        env = "PROMPT_MAX_LENGTH",
        default_value_t = learnhub_core::domain::validation::DEFAULT_MAX_PROMPT_LENGTH
    )]
    pub max_length: usize,
}

#[derive(Debug, Clone, ClapArgs)]
#[command(next_help_heading = "Logging")]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl TryFrom<Args> for LearnHubConfig {
    type Error = anyhow::Error;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let ttl_hours = args.auth.token_ttl_hours;
        ensure!(
            (1..=MAX_TOKEN_TTL_HOURS).contains(&ttl_hours),
            "TOKEN_TTL_HOURS must be between 1 and {MAX_TOKEN_TTL_HOURS}, got {ttl_hours}"
        );

        let prompt = PromptRules::with_max_length(args.prompt.max_length);
        ensure!(
            prompt.max_length >= prompt.min_length,
            "PROMPT_MAX_LENGTH must be at least {}, got {}",
            prompt.min_length,
            prompt.max_length
        );

        Ok(LearnHubConfig {
            database: DatabaseConfig {
                host: args.database.host,
                port: args.database.port,
                username: args.database.user,
                password: args.database.password,
                name: args.database.name,
            },
            llm: LLMConfig {
                api_key: args.llm.api_key,
                base_url: args.llm.base_url,
                model: args.llm.model,
                timeout: Duration::from_secs(args.llm.timeout_seconds),
                max_tokens: args.llm.max_tokens,
                temperature: args.llm.temperature,
            },
            auth: AuthConfig {
                jwt_secret: args.auth.jwt_secret,
                token_ttl_hours: args.auth.token_ttl_hours,
                admin_phone: args.auth.admin_phone,
            },
            prompt,
        })
    }
}
