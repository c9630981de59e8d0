//! User endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use pulse_core::PulseError;
use pulse_core::models::user::{SignInUser, SubscriptionStatus, User, UserRole};
use pulse_core::repository::{PaginatedResult, UserRepository};
use serde::Deserialize;

use crate::auth::{AuthedUser, require_admin, require_self};
use crate::error::ApiResult;
use crate::state::AppState;

use super::PageQuery;

/// Create the user on first sign-in; later sign-ins echo the stored
/// record.
pub async fn sign_in(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SignInUser>,
) -> ApiResult<Json<User>> {
    let user = state.users.upsert_on_sign_in(body).await?;
    Ok(Json(user))
}

/// Admin-only user listing.
pub async fn list(
    State(state): State<Arc<AppState>>,
    AuthedUser(claims): AuthedUser,
    Query(page): Query<PageQuery>,
) -> ApiResult<Json<PaginatedResult<User>>> {
    require_admin(&state, &claims).await?;
    let users = state.users.list(page.pagination()).await?;
    Ok(Json(users))
}

/// Missing users surface as a null body, not a 404.
pub async fn get(
    State(state): State<Arc<AppState>>,
    AuthedUser(claims): AuthedUser,
    Path(email): Path<String>,
) -> ApiResult<Json<Option<User>>> {
    require_self(&claims, &email)?;
    match state.users.get_by_email(&email).await {
        Ok(user) => Ok(Json(Some(user))),
        Err(PulseError::NotFound { .. }) => Ok(Json(None)),
        Err(e) => Err(e.into()),
    }
}

/// The caller's own stored role, for client-side menu gating.
/// Enforcement happens server-side anyway.
pub async fn role(
    State(state): State<Arc<AppState>>,
    AuthedUser(claims): AuthedUser,
    Path(email): Path<String>,
) -> ApiResult<Json<Option<UserRole>>> {
    require_self(&claims, &email)?;
    match state.users.get_by_email(&email).await {
        Ok(user) => Ok(Json(Some(user.role))),
        Err(PulseError::NotFound { .. }) => Ok(Json(None)),
        Err(e) => Err(e.into()),
    }
}

#[derive(Debug, Deserialize)]
pub struct SetRoleRequest {
    pub role: UserRole,
}

/// Admin-only role change.
pub async fn set_role(
    State(state): State<Arc<AppState>>,
    AuthedUser(claims): AuthedUser,
    Path(email): Path<String>,
    Json(body): Json<SetRoleRequest>,
) -> ApiResult<Json<User>> {
    require_admin(&state, &claims).await?;
    let user = state.users.set_role(&email, body.role).await?;
    Ok(Json(user))
}

/// Flip the caller's own subscription to Verified after a completed
/// payment.
pub async fn set_subscription(
    State(state): State<Arc<AppState>>,
    AuthedUser(claims): AuthedUser,
    Path(email): Path<String>,
) -> ApiResult<Json<User>> {
    require_self(&claims, &email)?;
    let user = state
        .users
        .set_subscription(&email, SubscriptionStatus::Verified)
        .await?;
    Ok(Json(user))
}
