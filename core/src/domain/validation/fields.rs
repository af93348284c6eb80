use std::{fmt, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::common::entities::app_errors::FieldError;

pub const MAX_ID: i64 = 2_147_483_647;
pub const MIN_PASSWORD_LENGTH: usize = 6;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}\p{M}\s\-'.]+$").expect("valid regex"));

/// Israeli mobile format: `05` followed by eight digits.
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^05[0-9]{8}$").expect("valid regex"));

static CATEGORY_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[א-תa-zA-Z0-9\s\-]+$").expect("valid regex"));

pub fn validate_name(raw: &str) -> Result<String, FieldError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(FieldError::new("name", "Name is required"));
    }

    let length = name.chars().count();
    if length < 2 {
        return Err(FieldError::new(
            "name",
            format!("Name must be at least 2 characters long. Current length: {length}"),
        ));
    }
    if length > 100 {
        return Err(FieldError::new(
            "name",
            format!("Name exceeds maximum length of 100 characters. Current length: {length}"),
        ));
    }
    if !NAME_PATTERN.is_match(name) {
        return Err(FieldError::new(
            "name",
            "Name contains invalid characters. Only letters, spaces, hyphens, and apostrophes are allowed",
        ));
    }

    Ok(name.to_string())
}

pub fn validate_phone(raw: &str) -> Result<String, FieldError> {
    let phone = raw.trim();
    if phone.is_empty() {
        return Err(FieldError::new("phone", "Phone number is required"));
    }
    if !PHONE_PATTERN.is_match(phone) {
        return Err(FieldError::new(
            "phone",
            "Invalid phone number format. Expected 10 digits starting with 05 (e.g. 0501234567)",
        ));
    }

    Ok(phone.to_string())
}

/// Passwords are never trimmed.
pub fn validate_password(raw: &str) -> Result<String, FieldError> {
    if raw.is_empty() {
        return Err(FieldError::new("password", "Password is required"));
    }
    if raw.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(FieldError::new(
            "password",
            format!("Password must be at least {MIN_PASSWORD_LENGTH} characters long"),
        ));
    }

    Ok(raw.to_string())
}

/// Shared by categories and sub-categories; `label` names the field in messages.
pub fn validate_category_name(raw: &str, label: &str) -> Result<String, FieldError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(FieldError::new("name", format!("{label} is required")));
    }

    let length = name.chars().count();
    if length < 2 {
        return Err(FieldError::new(
            "name",
            format!("{label} must be at least 2 characters long. Current length: {length}"),
        ));
    }
    if length > 50 {
        return Err(FieldError::new(
            "name",
            format!("{label} exceeds maximum length of 50 characters. Current length: {length}"),
        ));
    }
    if !CATEGORY_NAME_PATTERN.is_match(name) {
        return Err(FieldError::new(
            "name",
            format!(
                "{label} contains invalid characters. Only letters, numbers, spaces, and hyphens are allowed"
            ),
        ));
    }

    Ok(name.to_string())
}

/// An identifier as it arrives from JSON or a path segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum RawId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawId::Number(n) => write!(f, "{n}"),
            RawId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i32> for RawId {
    fn from(value: i32) -> Self {
        RawId::Number(value.into())
    }
}

impl From<&str> for RawId {
    fn from(value: &str) -> Self {
        RawId::Text(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    User,
    Category,
    SubCategory,
    Prompt,
}

impl IdKind {
    pub fn field(&self) -> &'static str {
        match self {
            IdKind::User => "user_id",
            IdKind::Category => "category_id",
            IdKind::SubCategory => "sub_category_id",
            IdKind::Prompt => "prompt_id",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            IdKind::User => "User",
            IdKind::Category => "Category",
            IdKind::SubCategory => "Sub-category",
            IdKind::Prompt => "Prompt",
        }
    }
}

pub fn validate_id(raw: &RawId, kind: IdKind) -> Result<i32, FieldError> {
    let label = kind.label();
    let value = match raw {
        RawId::Number(n) => *n,
        RawId::Text(s) => s.trim().parse::<i64>().map_err(|_| {
            FieldError::new(
                kind.field(),
                format!("{label} ID must be a valid number. Received: {s}"),
            )
        })?,
    };

    if value < 1 {
        return Err(FieldError::new(
            kind.field(),
            format!("{label} ID must be a positive integer. Received: {value}"),
        ));
    }
    if value > MAX_ID {
        return Err(FieldError::new(
            kind.field(),
            format!("{label} ID exceeds maximum allowed value"),
        ));
    }

    i32::try_from(value).map_err(|_| {
        FieldError::new(
            kind.field(),
            format!("{label} ID exceeds maximum allowed value"),
        )
    })
}

pub fn require_id(raw: Option<&RawId>, kind: IdKind) -> Result<i32, FieldError> {
    match raw {
        Some(raw) => validate_id(raw, kind),
        None => Err(FieldError::new(
            kind.field(),
            format!("{} ID is required", kind.label()),
        )),
    }
}
