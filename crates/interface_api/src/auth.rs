//! Authentication
//!
//! The identity/session provider is external; this layer only validates
//! the bearer tokens it issues and exposes the caller's identity to
//! handlers and the audit log.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (the caller's participant identifier)
    pub sub: String,
    /// Display name supplied by the identity provider
    pub name: Option<String>,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

/// Auth errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
}

/// Creates a new JWT token
///
/// Used by tests and local tooling; production tokens come from the
/// hosted identity provider signing with the same secret.
pub fn create_token(
    subject: &str,
    name: Option<String>,
    secret: &str,
    expiration_secs: u64,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(expiration_secs as i64);

    let claims = Claims {
        sub: subject.to_string(),
        name,
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::InvalidToken)
}

/// Validates a JWT token and returns its claims
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        if e.to_string().contains("ExpiredSignature") {
            AuthError::TokenExpired
        } else {
            AuthError::InvalidToken
        }
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        let token = create_token("MBR-123", Some("Ana".to_string()), "secret", 60).unwrap();
        let claims = validate_token(&token, "secret").unwrap();

        assert_eq!(claims.sub, "MBR-123");
        assert_eq!(claims.name.as_deref(), Some("Ana"));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = create_token("MBR-123", None, "secret", 60).unwrap();
        assert!(matches!(
            validate_token(&token, "other"),
            Err(AuthError::InvalidToken)
        ));
    }
}
