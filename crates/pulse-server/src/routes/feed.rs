//! Trending and featured feeds.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use pulse_core::models::product::Product;
use pulse_core::repository::ProductRepository;
use pulse_feed::{RankedProduct, TrendingRanker};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::state::AppState;

const DEFAULT_TRENDING_LIMIT: usize = 8;

#[derive(Debug, Deserialize)]
pub struct TrendingQuery {
    pub limit: Option<usize>,
}

/// Top-K products by upvote count, regardless of moderation status.
pub async fn trending(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TrendingQuery>,
) -> ApiResult<Json<Vec<RankedProduct>>> {
    let ranker = TrendingRanker::new(state.products.clone(), state.votes.clone());
    let ranked = ranker
        .top(query.limit.unwrap_or(DEFAULT_TRENDING_LIMIT))
        .await?;
    Ok(Json(ranked))
}

/// Accepted listings carrying the featured flag. Plain filter, no
/// ranking.
pub async fn featured(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Product>>> {
    let products = state.products.list_featured().await?;
    Ok(Json(products))
}
