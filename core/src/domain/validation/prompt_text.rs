use crate::domain::common::entities::app_errors::FieldError;

pub const DEFAULT_MIN_PROMPT_LENGTH: usize = 10;
pub const DEFAULT_MAX_PROMPT_LENGTH: usize = 1000;

/// A run of this many identical characters counts as spam.
const REPEATED_RUN: usize = 5;

const ALLOWED_PUNCTUATION: &str = ".,!?'\"()-:;/@#$%^&*+=[]{}|\\`~_";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRules {
    pub min_length: usize,
    pub max_length: usize,
    pub reject_repeated_chars: bool,
}

impl Default for PromptRules {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_PROMPT_LENGTH,
            max_length: DEFAULT_MAX_PROMPT_LENGTH,
            reject_repeated_chars: true,
        }
    }
}

impl PromptRules {
    pub fn with_max_length(max_length: usize) -> Self {
        Self {
            max_length,
            ..Default::default()
        }
    }
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || ('א'..='ת').contains(&c)
        || c.is_whitespace()
        || ALLOWED_PUNCTUATION.contains(c)
}

fn has_repeated_run(text: &str) -> bool {
    let mut previous: Option<char> = None;
    let mut run = 0;

    for c in text.chars().flat_map(char::to_lowercase) {
        if previous == Some(c) {
            run += 1;
        } else {
            previous = Some(c);
            run = 1;
        }
        if run >= REPEATED_RUN {
            return true;
        }
    }

    false
}

pub fn validate_prompt_text(raw: &str, rules: &PromptRules) -> Result<String, FieldError> {
    if raw.is_empty() {
        return Err(FieldError::new(
            "prompt",
            "Prompt is required and cannot be empty",
        ));
    }

    let prompt = raw.trim();
    if prompt.is_empty() {
        return Err(FieldError::new("prompt", "Prompt cannot be only whitespace"));
    }

    let length = prompt.chars().count();
    if length < rules.min_length {
        return Err(FieldError::new(
            "prompt",
            format!(
                "Prompt must be at least {} characters long. Current length: {length}",
                rules.min_length
            ),
        ));
    }
    if length > rules.max_length {
        return Err(FieldError::new(
            "prompt",
            format!(
                "Prompt exceeds maximum length of {} characters. Current length: {length}",
                rules.max_length
            ),
        ));
    }

    let mut invalid: Vec<char> = Vec::new();
    for c in prompt.chars().filter(|c| !is_allowed(*c)) {
        if !invalid.contains(&c) {
            invalid.push(c);
        }
    }
    if !invalid.is_empty() {
        let listed = invalid
            .iter()
            .map(char::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        return Err(FieldError::new(
            "prompt",
            format!("Prompt contains invalid characters: {listed}"),
        ));
    }

    if rules.reject_repeated_chars && has_repeated_run(prompt) {
        return Err(FieldError::new(
            "prompt",
            "Prompt appears to contain spam or inappropriate formatting",
        ));
    }

    Ok(prompt.to_string())
}
