pub mod delete_user;
pub mod get_me;
pub mod get_user;
pub mod get_user_analytics;
pub mod get_user_history;
pub mod get_users;
pub mod login;
pub mod register;
