pub mod mappers;
pub mod repositories;

pub use repositories::prompt_repository::PostgresPromptRepository;
