//! Dashboard statistics endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use pulse_core::repository::{AdminSnapshot, OwnerSnapshot, StatsRepository};

use crate::auth::{AuthedUser, require_admin, require_self};
use crate::error::ApiResult;
use crate::state::AppState;

/// Site-wide counts. Each count is its own query; the snapshot is
/// not atomic under concurrent writes.
pub async fn admin(
    State(state): State<Arc<AppState>>,
    AuthedUser(claims): AuthedUser,
) -> ApiResult<Json<AdminSnapshot>> {
    require_admin(&state, &claims).await?;
    let snapshot = state.stats.admin_snapshot().await?;
    Ok(Json(snapshot))
}

/// The caller's own dashboard counts.
pub async fn owner(
    State(state): State<Arc<AppState>>,
    AuthedUser(claims): AuthedUser,
    Path(email): Path<String>,
) -> ApiResult<Json<OwnerSnapshot>> {
    require_self(&claims, &email)?;
    let snapshot = state.stats.owner_snapshot(&email).await?;
    Ok(Json(snapshot))
}
