use serde::Serialize;

use crate::domain::{
    category::entities::CategoryWithSubCategories, common::entities::app_errors::CoreError,
    prompt::entities::PromptDetails, user::entities::UserSummary,
};

/// A row that can be written as one CSV line.
pub trait CsvRecord {
    fn headers() -> &'static [&'static str];

    fn fields(&self) -> Vec<String>;
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn line(fields: impl IntoIterator<Item = String>) -> String {
    fields
        .into_iter()
        .map(|f| escape(&f))
        .collect::<Vec<_>>()
        .join(",")
}

pub fn to_csv<R: CsvRecord>(rows: &[R]) -> String {
    let mut out = line(R::headers().iter().map(|h| h.to_string()));
    out.push('\n');
    for row in rows {
        out.push_str(&line(row.fields()));
        out.push('\n');
    }
    out
}

pub fn to_json<R: Serialize>(rows: &[R]) -> Result<String, CoreError> {
    serde_json::to_string_pretty(rows).map_err(|e| {
        tracing::error!("Failed to serialize export: {}", e);
        CoreError::InternalServerError
    })
}

impl CsvRecord for UserSummary {
    fn headers() -> &'static [&'static str] {
        &["id", "name", "phone", "role", "prompt_count", "created_at"]
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.user.id.to_string(),
            self.user.name.clone(),
            self.user.phone.clone(),
            self.user.role.to_string(),
            self.prompt_count.to_string(),
            self.user.created_at.to_rfc3339(),
        ]
    }
}

impl CsvRecord for PromptDetails {
    fn headers() -> &'static [&'static str] {
        &[
            "id",
            "user_id",
            "user_name",
            "category_name",
            "sub_category_name",
            "prompt",
            "response",
            "prompt_length",
            "response_length",
            "created_at",
        ]
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.prompt.id.to_string(),
            self.prompt.user_id.to_string(),
            self.user_name.clone(),
            self.category_name.clone(),
            self.sub_category_name.clone().unwrap_or_default(),
            self.prompt.prompt.clone(),
            self.prompt.response.clone(),
            self.prompt_length.to_string(),
            self.response_length.to_string(),
            self.prompt.created_at.to_rfc3339(),
        ]
    }
}

impl CsvRecord for CategoryWithSubCategories {
    fn headers() -> &'static [&'static str] {
        &["id", "name", "created_at", "sub_categories"]
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.category.id.to_string(),
            self.category.name.clone(),
            self.category.created_at.to_rfc3339(),
            self.sub_categories
                .iter()
                .map(|s| s.name.as_str())
                .collect::<Vec<_>>()
                .join("; "),
        ]
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::domain::{
        category::entities::{Category, SubCategory},
        prompt::entities::Prompt,
        user::entities::{User, UserRole},
    };

    fn created() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn plain_fields_are_not_quoted() {
        assert_eq!(escape("Programming"), "Programming");
    }

    #[test]
    fn special_characters_are_quoted() {
        assert_eq!(escape("a,b"), "\"a,b\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn users_csv_has_header_and_rows() {
        let rows = vec![UserSummary {
            user: User {
                id: 1,
                name: "Levi, Dana".to_string(),
                phone: "0501234567".to_string(),
                role: UserRole::Admin,
                created_at: created(),
                updated_at: created(),
            },
            prompt_count: 3,
        }];

        let csv = to_csv(&rows);
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("id,name,phone,role,prompt_count,created_at"));
        assert_eq!(
            lines.next(),
            Some("1,\"Levi, Dana\",0501234567,admin,3,2024-05-01T09:30:00+00:00")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn prompt_without_sub_category_has_empty_column() {
        let rows = vec![PromptDetails {
            prompt: Prompt {
                id: 5,
                user_id: 1,
                category_id: 2,
                sub_category_id: None,
                prompt: "Explain recursion".to_string(),
                response: "# Lesson".to_string(),
                created_at: created(),
            },
            user_name: "Dana".to_string(),
            category_name: "Programming".to_string(),
            sub_category_name: None,
            prompt_length: 17,
            response_length: 8,
        }];

        let csv = to_csv(&rows);
        assert!(csv.contains("5,1,Dana,Programming,,Explain recursion,# Lesson,17,8,"));
    }

    #[test]
    fn categories_join_sub_category_names() {
        let rows = vec![CategoryWithSubCategories {
            category: Category {
                id: 2,
                name: "Programming".to_string(),
                created_at: created(),
            },
            sub_categories: vec![
                SubCategory {
                    id: 3,
                    name: "Python".to_string(),
                    category_id: 2,
                    created_at: created(),
                },
                SubCategory {
                    id: 4,
                    name: "Rust".to_string(),
                    category_id: 2,
                    created_at: created(),
                },
            ],
        }];

        assert!(to_csv(&rows).ends_with(",Python; Rust\n"));
    }

    #[test]
    fn empty_export_is_header_only() {
        assert_eq!(
            to_csv::<CategoryWithSubCategories>(&[]),
            "id,name,created_at,sub_categories\n"
        );
        assert_eq!(to_json::<CategoryWithSubCategories>(&[]).unwrap(), "[]");
    }
}
