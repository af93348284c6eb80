use serde::{Deserialize, Serialize};

use crate::domain::user::entities::UserRole;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaim {
    /// User id, as a decimal string.
    pub sub: String,
    pub role: UserRole,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}
