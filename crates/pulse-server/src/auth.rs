//! Bearer-token extraction and role gating.
//!
//! Authentication is stateless token validation; authorization
//! re-reads the caller's stored role so a stale token never outranks
//! the database.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use pulse_auth::token::validate_access_token;
use pulse_auth::{AccessTokenClaims, AuthError, ValidatedClaims};
use pulse_core::PulseError;
use pulse_core::models::user::{User, UserRole};
use pulse_core::repository::UserRepository;

use crate::error::ApiError;
use crate::state::AppState;

/// Extractor proving the request carried a valid bearer token.
pub struct AuthedUser(pub AccessTokenClaims);

impl FromRequestParts<Arc<AppState>> for AuthedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthError::TokenMissing)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AuthError::TokenInvalid("malformed authorization header".into()))?;

        let ValidatedClaims(claims) = validate_access_token(token, &state.auth)?;
        Ok(AuthedUser(claims))
    }
}

/// Look up the caller's stored role and reject unless it is listed.
async fn require_role(
    state: &AppState,
    email: &str,
    allowed: &[UserRole],
) -> Result<User, ApiError> {
    let user = state
        .users
        .get_by_email(email)
        .await
        .map_err(|_| PulseError::AuthorizationDenied {
            reason: "caller is not a registered user".into(),
        })?;

    if !allowed.contains(&user.role) {
        return Err(PulseError::AuthorizationDenied {
            reason: "insufficient role".into(),
        }
        .into());
    }

    Ok(user)
}

/// Admin-only gate.
pub async fn require_admin(state: &AppState, claims: &AccessTokenClaims) -> Result<User, ApiError> {
    require_role(state, &claims.sub, &[UserRole::Admin]).await
}

/// Moderator gate; admins pass too.
pub async fn require_moderator(
    state: &AppState,
    claims: &AccessTokenClaims,
) -> Result<User, ApiError> {
    require_role(state, &claims.sub, &[UserRole::Moderator, UserRole::Admin]).await
}

/// Self-access gate: the token subject must match the path email.
pub fn require_self(claims: &AccessTokenClaims, email: &str) -> Result<(), ApiError> {
    if claims.sub != email {
        return Err(PulseError::AuthorizationDenied {
            reason: "token subject does not match requested resource".into(),
        }
        .into());
    }
    Ok(())
}
