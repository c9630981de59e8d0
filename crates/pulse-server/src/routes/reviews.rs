//! Review endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use pulse_core::models::review::{CreateReview, Review};
use pulse_core::repository::ReviewRepository;
use serde::Deserialize;

use crate::auth::{AuthedUser, require_moderator, require_self};
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub rating: u32,
    pub comment: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub user_photo: String,
}

/// One review per caller per product; a repeat call replaces the
/// earlier rating and comment.
pub async fn upsert(
    State(state): State<Arc<AppState>>,
    AuthedUser(claims): AuthedUser,
    Path(product_id): Path<String>,
    Json(body): Json<ReviewRequest>,
) -> ApiResult<Json<Review>> {
    let review = state
        .reviews
        .upsert(CreateReview {
            user_email: claims.sub,
            user_name: body.user_name,
            user_photo: body.user_photo,
            product_id,
            rating: body.rating,
            comment: body.comment,
        })
        .await?;
    Ok(Json(review))
}

/// Public review listing, newest first.
pub async fn for_product(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<String>,
) -> ApiResult<Json<Vec<Review>>> {
    let reviews = state.reviews.list_for_product(&product_id).await?;
    Ok(Json(reviews))
}

/// The caller's own reviews.
pub async fn by_author(
    State(state): State<Arc<AppState>>,
    AuthedUser(claims): AuthedUser,
    Path(email): Path<String>,
) -> ApiResult<Json<Vec<Review>>> {
    require_self(&claims, &email)?;
    let reviews = state.reviews.list_by_author(&email).await?;
    Ok(Json(reviews))
}

/// Moderator cleanup of a review.
pub async fn remove(
    State(state): State<Arc<AppState>>,
    AuthedUser(claims): AuthedUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    require_moderator(&state, &claims).await?;
    state.reviews.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
