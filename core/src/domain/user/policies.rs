use tracing::info;

use crate::domain::user::entities::{User, UserRole};

/// Decides roles from the configured admin phone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RolePolicy {
    admin_phone: Option<String>,
}

impl RolePolicy {
    pub fn new(admin_phone: Option<String>) -> Self {
        let admin_phone = admin_phone
            .map(|phone| phone.trim().to_string())
            .filter(|phone| !phone.is_empty());
        Self { admin_phone }
    }

    pub fn role_for(&self, phone: &str) -> UserRole {
        match &self.admin_phone {
            Some(admin_phone) if admin_phone == phone => UserRole::Admin,
            _ => UserRole::User,
        }
    }

    /// Returns the role a user should be promoted to at login, if any.
    /// Admins are never demoted.
    pub fn promotion_for(&self, user: &User) -> Option<UserRole> {
        if user.is_admin() {
            return None;
        }

        match self.role_for(&user.phone) {
            UserRole::Admin => {
                info!(
                    user_id = user.id,
                    from = %user.role,
                    to = %UserRole::Admin,
                    reason = "admin_phone_match",
                    "promoting user on login"
                );
                Some(UserRole::Admin)
            }
            UserRole::User => None,
        }
    }
}
