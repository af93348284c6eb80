pub mod create_category;
pub mod create_sub_category;
pub mod delete_category;
pub mod get_categories;
pub mod get_category;
pub mod get_sub_categories;
