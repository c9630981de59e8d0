//! Product endpoints: submission, public listing, moderation.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use pulse_core::PulseError;
use pulse_core::models::product::{
    CreateProduct, ModerateProduct, Product, ProductStatus, UpdateProduct,
};
use pulse_core::repository::{PaginatedResult, ProductRepository};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::{AuthedUser, require_moderator, require_self};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Submit a listing. New products start in Pending status and wait
/// for moderation.
pub async fn create(
    State(state): State<Arc<AppState>>,
    AuthedUser(claims): AuthedUser,
    Json(body): Json<CreateProduct>,
) -> ApiResult<Json<Product>> {
    require_self(&claims, &body.owner_email)?;
    let product = state.products.create(body).await?;
    Ok(Json(product))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
    pub tag: Option<String>,
}

/// Public listing: accepted products, newest first, optionally
/// narrowed to one tag.
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<PaginatedResult<Product>>> {
    let pagination = pulse_core::repository::Pagination {
        offset: query.offset.unwrap_or(0),
        limit: query.limit.unwrap_or(20),
    };

    let page = match query.tag.as_deref() {
        Some(tag) => state.products.search_by_tag(tag, pagination).await?,
        None => state.products.list_accepted(pagination).await?,
    };
    Ok(Json(page))
}

/// Product lookup. A missing id surfaces as a null body, not a 404.
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Option<Product>>> {
    match state.products.get_by_id(id).await {
        Ok(product) => Ok(Json(Some(product))),
        Err(PulseError::NotFound { .. }) => Ok(Json(None)),
        Err(e) => Err(e.into()),
    }
}

/// The caller's own submissions.
pub async fn by_owner(
    State(state): State<Arc<AppState>>,
    AuthedUser(claims): AuthedUser,
    Path(email): Path<String>,
) -> ApiResult<Json<Vec<Product>>> {
    require_self(&claims, &email)?;
    let products = state.products.list_by_owner(&email).await?;
    Ok(Json(products))
}

/// Moderation queue view over a single status.
pub async fn by_status(
    State(state): State<Arc<AppState>>,
    AuthedUser(claims): AuthedUser,
    Path(status): Path<String>,
) -> ApiResult<Json<Vec<Product>>> {
    require_moderator(&state, &claims).await?;

    let status = match status.as_str() {
        "Pending" => ProductStatus::Pending,
        "Accepted" => ProductStatus::Accepted,
        "Rejected" => ProductStatus::Rejected,
        other => {
            return Err(ApiError::from(PulseError::Validation {
                message: format!("unknown product status: {other}"),
            }));
        }
    };

    let products = state.products.list_by_status(status).await?;
    Ok(Json(products))
}

/// Listings flagged by user reports.
pub async fn reported(
    State(state): State<Arc<AppState>>,
    AuthedUser(claims): AuthedUser,
) -> ApiResult<Json<Vec<Product>>> {
    require_moderator(&state, &claims).await?;
    let products = state.products.list_reported().await?;
    Ok(Json(products))
}

/// Owner edit of descriptive fields.
pub async fn update(
    State(state): State<Arc<AppState>>,
    AuthedUser(claims): AuthedUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateProduct>,
) -> ApiResult<Json<Product>> {
    let existing = state.products.get_by_id(id).await?;
    require_self(&claims, &existing.owner_email)?;

    let product = state.products.update_details(id, body).await?;
    Ok(Json(product))
}

/// Moderator flags: status, featured, reported.
pub async fn moderate(
    State(state): State<Arc<AppState>>,
    AuthedUser(claims): AuthedUser,
    Path(id): Path<Uuid>,
    Json(body): Json<ModerateProduct>,
) -> ApiResult<Json<Product>> {
    require_moderator(&state, &claims).await?;
    let product = state.products.moderate(id, body).await?;
    Ok(Json(product))
}

/// Remove a product along with its reviews and reports.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    AuthedUser(claims): AuthedUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    require_moderator(&state, &claims).await?;
    state.products.delete_cascade(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
