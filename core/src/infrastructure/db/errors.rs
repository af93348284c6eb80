use sea_orm::{DbErr, SqlErr};
use tracing::error;

use crate::domain::common::entities::app_errors::{CoreError, FieldError};

/// Maps a storage failure onto the domain taxonomy.
///
/// Unique violations become `Duplicate(duplicate)` and foreign-key violations become a
/// validation error on `field`. Anything else is logged and returned opaque.
pub fn classify(err: DbErr, context: &str, duplicate: &str, field: &str) -> CoreError {
    from_violation(err.sql_err(), context, duplicate, field)
        .unwrap_or_else(|| internal(err, context))
}

fn from_violation(
    violation: Option<SqlErr>,
    context: &str,
    duplicate: &str,
    field: &str,
) -> Option<CoreError> {
    match violation? {
        SqlErr::UniqueConstraintViolation(detail) => {
            tracing::info!(%detail, "{}: unique constraint violated", context);
            Some(CoreError::Duplicate(duplicate.to_string()))
        }
        SqlErr::ForeignKeyConstraintViolation(detail) => {
            tracing::info!(%detail, "{}: foreign key violated", context);
            Some(CoreError::Validation(vec![FieldError::new(
                field,
                "Referenced record does not exist or is still in use",
            )]))
        }
        _ => None,
    }
}

/// Logs and hides a failure that has no domain meaning.
pub fn internal(err: DbErr, context: &str) -> CoreError {
    error!("{}: {}", context, err);
    CoreError::InternalServerError
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_is_a_duplicate() {
        let error = from_violation(
            Some(SqlErr::UniqueConstraintViolation(
                "duplicate key value violates unique constraint \"users_phone_key\"".to_string(),
            )),
            "create user",
            "Phone number already exists",
            "phone",
        );
        assert_eq!(
            error,
            Some(CoreError::Duplicate("Phone number already exists".to_string()))
        );
    }

    #[test]
    fn foreign_key_violation_is_a_field_error() {
        let error = from_violation(
            Some(SqlErr::ForeignKeyConstraintViolation(
                "insert or update on table \"prompts\" violates foreign key constraint".to_string(),
            )),
            "create prompt",
            "Prompt already exists",
            "category_id",
        )
        .unwrap();
        assert_eq!(error.field_errors().len(), 1);
        assert_eq!(error.field_errors()[0].field, "category_id");
    }

    #[test]
    fn other_failures_stay_opaque() {
        assert_eq!(from_violation(None, "list users", "", "id"), None);
        assert_eq!(
            classify(
                DbErr::Custom("connection reset".to_string()),
                "list users",
                "User already exists",
                "id"
            ),
            CoreError::InternalServerError
        );
        assert_eq!(
            classify(
                DbErr::RecordNotInserted,
                "create category",
                "Category already exists",
                "name"
            ),
            CoreError::InternalServerError
        );
    }
}
