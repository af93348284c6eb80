use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;

use crate::domain::user::entities::{User, UserCredentials, UserRole, UserSummary};
use crate::entity::users::Model as UserModel;

/// The CHECK constraint only admits the two known roles.
fn role(raw: &str) -> UserRole {
    raw.parse().unwrap_or(UserRole::User)
}

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: model.id,
            name: model.name,
            phone: model.phone,
            role: role(&model.role),
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

impl From<UserModel> for UserCredentials {
    fn from(model: UserModel) -> Self {
        let password_hash = model.password_hash.clone();
        UserCredentials {
            user: User::from(model),
            password_hash,
        }
    }
}

#[derive(Debug, FromQueryResult)]
pub struct UserSummaryRow {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub prompt_count: i64,
}

impl From<UserSummaryRow> for UserSummary {
    fn from(row: UserSummaryRow) -> Self {
        UserSummary {
            user: User {
                id: row.id,
                name: row.name,
                phone: row.phone,
                role: role(&row.role),
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            prompt_count: row.prompt_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};

    use super::*;

    #[test]
    fn model_maps_role_and_utc_timestamps() {
        let offset = FixedOffset::east_opt(3 * 3600).unwrap();
        let created = offset.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let model = UserModel {
            id: 4,
            name: "Dana Levi".to_string(),
            phone: "0501234567".to_string(),
            password_hash: "$argon2id$...".to_string(),
            role: "admin".to_string(),
            created_at: created,
            updated_at: created,
        };

        let credentials = UserCredentials::from(model);
        assert_eq!(credentials.user.role, UserRole::Admin);
        assert_eq!(credentials.password_hash, "$argon2id$...");
        assert_eq!(
            credentials.user.created_at,
            Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
        );
    }
}
