//! sea-orm models of the four tables created by `core/migrations`.

pub mod categories;
pub mod prompts;
pub mod sub_categories;
pub mod users;
