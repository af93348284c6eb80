pub mod admin;
pub mod category;
pub mod health;
pub mod prompt;
pub mod query_extractor;
pub mod query_params;
pub mod server;
pub mod user;
