use crate::domain::{
    common::entities::app_errors::CoreError,
    jwt::entities::JwtClaim,
    user::entities::User,
};

#[cfg_attr(test, mockall::automock)]
pub trait TokenRepository: Send + Sync {
    fn issue(&self, user: &User) -> Result<String, CoreError>;

    /// Fails with `Unauthenticated` for malformed, tampered or expired tokens.
    fn verify(&self, token: &str) -> Result<JwtClaim, CoreError>;
}
