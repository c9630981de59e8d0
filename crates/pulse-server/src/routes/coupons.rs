//! Coupon endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use pulse_billing::{CouponStanding, CouponValidator};
use pulse_core::models::coupon::{Coupon, CreateCoupon, UpdateCoupon};
use pulse_core::repository::CouponRepository;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::auth::{AuthedUser, require_admin};
use crate::error::ApiResult;
use crate::state::AppState;

/// Active coupons for display. Expiry is evaluated here at read
/// time, never stored.
pub async fn active(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Coupon>>> {
    let coupons = CouponValidator::new(state.coupons.clone())
        .list_active()
        .await?;
    Ok(Json(coupons))
}

/// Admin view including expired coupons.
pub async fn all(
    State(state): State<Arc<AppState>>,
    AuthedUser(claims): AuthedUser,
) -> ApiResult<Json<Vec<Coupon>>> {
    require_admin(&state, &claims).await?;
    let coupons = state.coupons.list().await?;
    Ok(Json(coupons))
}

/// Admin-only coupon creation.
pub async fn create(
    State(state): State<Arc<AppState>>,
    AuthedUser(claims): AuthedUser,
    Json(body): Json<CreateCoupon>,
) -> ApiResult<Json<Coupon>> {
    require_admin(&state, &claims).await?;
    let coupon = state.coupons.create(body).await?;
    Ok(Json(coupon))
}

/// Admin-only coupon edit.
pub async fn update(
    State(state): State<Arc<AppState>>,
    AuthedUser(claims): AuthedUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateCoupon>,
) -> ApiResult<Json<Coupon>> {
    require_admin(&state, &claims).await?;
    let coupon = state.coupons.update(id, body).await?;
    Ok(Json(coupon))
}

/// Admin-only coupon removal.
pub async fn remove(
    State(state): State<Arc<AppState>>,
    AuthedUser(claims): AuthedUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    require_admin(&state, &claims).await?;
    state.coupons.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Redemption check.
///
/// Unknown codes return an empty object, expired coupons an explicit
/// zero discount, valid coupons the discount amount.
pub async fn validate(
    State(state): State<Arc<AppState>>,
    AuthedUser(_claims): AuthedUser,
    Path(code): Path<String>,
) -> ApiResult<Json<Value>> {
    let standing = CouponValidator::new(state.coupons.clone())
        .check(&code)
        .await?;

    let body = match standing {
        CouponStanding::NotFound => json!({}),
        CouponStanding::Expired => json!({ "discount": 0 }),
        CouponStanding::Valid { discount } => json!({ "discount": discount }),
    };
    Ok(Json(body))
}
