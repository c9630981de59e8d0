//! Authentication error types.

use pulse_core::error::PulseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    TokenMissing,

    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for PulseError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::TokenMissing | AuthError::TokenExpired | AuthError::TokenInvalid(_) => {
                PulseError::AuthenticationFailed {
                    reason: err.to_string(),
                }
            }
            AuthError::Crypto(msg) => PulseError::Internal(msg),
        }
    }
}
