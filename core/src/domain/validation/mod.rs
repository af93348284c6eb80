//! Field validators. Each takes one raw value and returns either the sanitized
//! value or a [`FieldError`](crate::domain::common::entities::app_errors::FieldError);
//! expected bad input never panics.

mod date_range;
mod export;
mod fields;
mod pagination;
mod prompt_text;

pub use date_range::{DateRange, validate_date_range, validate_date_range_at};
pub use export::validate_export_params;
pub use fields::{
    IdKind, MAX_ID, RawId, require_id, validate_category_name, validate_id, validate_name,
    validate_password, validate_phone,
};
pub use pagination::resolve_pagination;
pub use prompt_text::{
    DEFAULT_MAX_PROMPT_LENGTH, DEFAULT_MIN_PROMPT_LENGTH, PromptRules, validate_prompt_text,
};
