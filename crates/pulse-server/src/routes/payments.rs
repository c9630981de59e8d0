//! Payment endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use pulse_core::models::payment::{CreatePayment, Payment};
use pulse_core::models::user::SubscriptionStatus;
use pulse_core::repository::{PaginatedResult, PaymentRepository, UserRepository};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::auth::{AuthedUser, require_admin, require_self};
use crate::error::ApiResult;
use crate::state::AppState;

use super::PageQuery;

#[derive(Debug, Deserialize)]
pub struct IntentRequest {
    /// Charge amount in cents.
    pub amount: i64,
    pub currency: Option<String>,
}

/// Delegate intent creation to the payment gateway and hand the
/// client secret back for client-side confirmation.
pub async fn create_intent(
    State(state): State<Arc<AppState>>,
    AuthedUser(_claims): AuthedUser,
    Json(body): Json<IntentRequest>,
) -> ApiResult<Json<Value>> {
    let intent = state
        .gateway
        .create_intent(body.amount, body.currency.as_deref().unwrap_or("usd"))
        .await?;
    Ok(Json(json!({ "client_secret": intent.client_secret })))
}

#[derive(Debug, Deserialize)]
pub struct RecordPaymentRequest {
    pub amount: i64,
    pub currency: String,
    pub transaction_id: String,
}

/// Log a completed transaction and mark the payer as subscribed.
///
/// Two independent writes; the payment log is the source of truth if
/// the subscription flip is lost.
pub async fn record(
    State(state): State<Arc<AppState>>,
    AuthedUser(claims): AuthedUser,
    Json(body): Json<RecordPaymentRequest>,
) -> ApiResult<Json<Payment>> {
    let payment = state
        .payments
        .append(CreatePayment {
            user_email: claims.sub.clone(),
            amount: body.amount,
            currency: body.currency,
            transaction_id: body.transaction_id,
        })
        .await?;

    state
        .users
        .set_subscription(&claims.sub, SubscriptionStatus::Verified)
        .await?;

    Ok(Json(payment))
}

/// Admin-only transaction log.
pub async fn list(
    State(state): State<Arc<AppState>>,
    AuthedUser(claims): AuthedUser,
    Query(page): Query<PageQuery>,
) -> ApiResult<Json<PaginatedResult<Payment>>> {
    require_admin(&state, &claims).await?;
    let payments = state.payments.list(page.pagination()).await?;
    Ok(Json(payments))
}

/// The caller's own transactions.
pub async fn by_user(
    State(state): State<Arc<AppState>>,
    AuthedUser(claims): AuthedUser,
    Path(email): Path<String>,
) -> ApiResult<Json<Vec<Payment>>> {
    require_self(&claims, &email)?;
    let payments = state.payments.list_by_user(&email).await?;
    Ok(Json(payments))
}
