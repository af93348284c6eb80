pub mod export;
pub mod get_all_prompts;
pub mod get_dashboard;
pub mod get_users_with_history;
