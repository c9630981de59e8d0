//! JWT access token issuance and verification.
//!
//! Tokens are signed with a shared HS256 secret from configuration
//! and carry the caller's email as the subject. Role checks are NOT
//! encoded in the token: authorization gates re-read the stored role,
//! so a stale token cannot keep a demoted moderator in power.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;

/// JWT claims embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Subject — the user's email.
    pub sub: String,
    /// Display name at issuance time.
    pub name: String,
    /// Issuer.
    pub iss: String,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
    /// Unique token ID (UUID string).
    pub jti: String,
}

/// Issue a signed HS256 JWT access token.
pub fn issue_access_token(
    email: &str,
    name: &str,
    config: &AuthConfig,
) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();
    let claims = AccessTokenClaims {
        sub: email.to_string(),
        name: name.to_string(),
        iss: config.jwt_issuer.clone(),
        iat: now,
        exp: now + config.access_token_lifetime_secs as i64,
        jti: Uuid::new_v4().to_string(),
    };

    let key = EncodingKey::from_secret(config.token_secret.as_bytes());

    let header = Header::new(Algorithm::HS256);
    jsonwebtoken::encode(&header, &claims, &key)
        .map_err(|e| AuthError::Crypto(format!("JWT encode: {e}")))
}

/// Decode and verify an HS256 JWT access token.
pub fn decode_access_token(
    token: &str,
    config: &AuthConfig,
) -> Result<AccessTokenClaims, AuthError> {
    let key = DecodingKey::from_secret(config.token_secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.jwt_issuer]);
    validation.set_required_spec_claims(&["sub", "exp", "iat", "iss"]);

    jsonwebtoken::decode::<AccessTokenClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid(e.to_string()),
        })
}

/// Validated JWT claims — a newtype proving the token was verified.
///
/// Used by the API layer to extract authenticated context from
/// incoming requests.
#[derive(Debug, Clone)]
pub struct ValidatedClaims(pub AccessTokenClaims);

/// Validate a JWT access token (signature, expiry, issuer) and return
/// the verified claims.
///
/// This is the entry point for request-level authentication. It is
/// purely stateless — no database lookup is performed.
pub fn validate_access_token(
    token: &str,
    config: &AuthConfig,
) -> Result<ValidatedClaims, AuthError> {
    decode_access_token(token, config).map(ValidatedClaims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            token_secret: "test-secret-do-not-use".into(),
            access_token_lifetime_secs: 86_400,
            jwt_issuer: "productpulse-test".into(),
        }
    }

    #[test]
    fn jwt_roundtrip() {
        let config = test_config();

        let token = issue_access_token("alice@example.com", "Alice", &config).unwrap();
        let claims = decode_access_token(&token, &config).unwrap();

        assert_eq!(claims.sub, "alice@example.com");
        assert_eq!(claims.name, "Alice");
        assert_eq!(claims.iss, "productpulse-test");
        assert_eq!(claims.exp - claims.iat, 86_400);
    }

    #[test]
    fn jti_is_unique() {
        let config = test_config();

        let t1 = issue_access_token("a@x.com", "A", &config).unwrap();
        let t2 = issue_access_token("a@x.com", "A", &config).unwrap();

        let c1 = decode_access_token(&t1, &config).unwrap();
        let c2 = decode_access_token(&t2, &config).unwrap();
        assert_ne!(c1.jti, c2.jti);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let config = test_config();
        let token = issue_access_token("a@x.com", "A", &config).unwrap();

        let other = AuthConfig {
            token_secret: "a-different-secret".into(),
            ..test_config()
        };
        let result = decode_access_token(&token, &other);
        assert!(matches!(result, Err(AuthError::TokenInvalid(_))));
    }

    #[test]
    fn wrong_issuer_is_rejected() {
        let config = test_config();
        let token = issue_access_token("a@x.com", "A", &config).unwrap();

        let other = AuthConfig {
            jwt_issuer: "someone-else".into(),
            ..test_config()
        };
        let result = decode_access_token(&token, &other);
        assert!(matches!(result, Err(AuthError::TokenInvalid(_))));
    }

    #[test]
    fn validate_wraps_claims() {
        let config = test_config();
        let token = issue_access_token("a@x.com", "A", &config).unwrap();

        let ValidatedClaims(claims) = validate_access_token(&token, &config).unwrap();
        assert_eq!(claims.sub, "a@x.com");
    }
}
