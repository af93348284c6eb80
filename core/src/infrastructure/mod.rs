pub mod category;
pub mod crypto;
pub mod db;
pub mod health;
pub mod jwt;
pub mod llm;
pub mod prompt;
pub mod user;
