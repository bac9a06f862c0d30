use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::SecurityConfig;
use crate::database::models::Role;

/// Session token claims: identity plus role, nothing else
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, role: Role, ttl_hours: u64) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            role,
            iat: now.timestamp(),
            exp: (now + Duration::hours(ttl_hours as i64)).timestamp(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Signature mismatch, malformed payload, or elapsed expiry
    #[error("invalid token")]
    InvalidToken,
    #[error("JWT secret not configured")]
    MissingSecret,
    #[error("password hash error: {0}")]
    Hash(String),
}

/// Issue a signed session token for the given identity.
///
/// The signing secret and lifetime come from the caller-supplied config;
/// this module never reads the ambient environment.
pub fn issue_token(security: &SecurityConfig, user_id: Uuid, role: Role) -> Result<String, AuthError> {
    if security.jwt_secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    let claims = Claims::new(user_id, role, security.token_ttl_hours);
    let key = EncodingKey::from_secret(security.jwt_secret.as_bytes());

    encode(&Header::default(), &claims, &key).map_err(|_| AuthError::InvalidToken)
}

/// Verify a session token and return its claims. Pure check, no side effects.
pub fn verify_token(security: &SecurityConfig, token: &str) -> Result<Claims, AuthError> {
    if security.jwt_secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    let key = DecodingKey::from_secret(security.jwt_secret.as_bytes());
    let mut validation = Validation::default();
    // Exact expiry; the default 60s leeway would let expired tokens through
    validation.leeway = 0;

    decode::<Claims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|_| AuthError::InvalidToken)
}

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| AuthError::Hash(e.to_string()))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    bcrypt::verify(password, hash).map_err(|e| AuthError::Hash(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn security() -> SecurityConfig {
        SecurityConfig {
            jwt_secret: "test-secret".into(),
            token_ttl_hours: 1,
            enable_cors: false,
            cors_origins: vec![],
        }
    }

    #[test]
    fn issued_token_round_trips_before_expiry() {
        let sec = security();
        let user_id = Uuid::new_v4();
        let token = issue_token(&sec, user_id, Role::Staff).unwrap();
        let claims = verify_token(&sec, &token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, Role::Staff);
    }

    #[test]
    fn expired_token_is_rejected() {
        let sec = security();
        let mut claims = Claims::new(Uuid::new_v4(), Role::Client, 1);
        claims.exp = (Utc::now() - Duration::minutes(5)).timestamp();
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(sec.jwt_secret.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            verify_token(&sec, &token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let sec = security();
        let token = issue_token(&sec, Uuid::new_v4(), Role::Client).unwrap();

        let mut other = security();
        other.jwt_secret = "other-secret".into();
        assert!(matches!(
            verify_token(&other, &token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn malformed_token_is_rejected() {
        let sec = security();
        assert!(matches!(
            verify_token(&sec, "not.a.token"),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn empty_secret_refuses_to_sign() {
        let mut sec = security();
        sec.jwt_secret = String::new();
        assert!(matches!(
            issue_token(&sec, Uuid::new_v4(), Role::Client),
            Err(AuthError::MissingSecret)
        ));
    }
}
