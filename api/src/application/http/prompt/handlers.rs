pub mod delete_prompt;
pub mod generate_prompt;
pub mod get_prompt;
pub mod get_prompts;
pub mod get_user_prompts;
