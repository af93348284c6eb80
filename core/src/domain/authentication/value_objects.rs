use serde::{Deserialize, Serialize};

use crate::domain::user::entities::{User, UserRole};

/// The caller behind an authenticated request, reloaded from storage on each request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: i32,
    pub name: String,
    pub role: UserRole,
}

impl Identity {
    pub fn id(&self) -> i32 {
        self.user_id
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            name: user.name.clone(),
            role: user.role,
        }
    }
}
