use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind,
};
use tracing::{debug, error};
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    jwt::{entities::JwtClaim, ports::TokenRepository},
    user::entities::User,
};

/// HS256 access tokens signed with the configured secret.
#[derive(Clone)]
pub struct JwtTokenRepository {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl JwtTokenRepository {
    pub fn new(secret: &str, ttl_hours: i64) -> Result<Self, CoreError> {
        let ttl = Duration::try_hours(ttl_hours).ok_or_else(|| {
            CoreError::validation(
                "token_ttl_hours",
                format!("Token lifetime of {ttl_hours} hours is out of range"),
            )
        })?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        })
    }
}

impl TokenRepository for JwtTokenRepository {
    fn issue(&self, user: &User) -> Result<String, CoreError> {
        let now = Utc::now();
        let expires_at = now.checked_add_signed(self.ttl).ok_or_else(|| {
            error!("Token lifetime overflows the clock");
            CoreError::InternalServerError
        })?;
        let claim = JwtClaim {
            sub: user.id.to_string(),
            role: user.role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claim, &self.encoding_key).map_err(|e| {
            error!("Failed to sign token: {}", e);
            CoreError::InternalServerError
        })
    }

    fn verify(&self, token: &str) -> Result<JwtClaim, CoreError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<JwtClaim>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!("Rejected token: {}", e);
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        CoreError::Unauthenticated("Token expired".to_string())
                    }
                    _ => CoreError::Unauthenticated("Invalid token".to_string()),
                }
            })
    }
}
