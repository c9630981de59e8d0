//! Vote endpoints.
//!
//! Two write paths exist for compatibility: `POST /votes` appends a
//! record unconditionally, while `PUT /products/{id}/vote` upserts
//! keyed on the caller and product so their latest vote wins. The
//! tally endpoint just counts rows either way.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use pulse_core::models::vote::{CastVote, Vote, VoteKind, VoteTally};
use pulse_core::repository::VoteRepository;
use pulse_feed::TallyService;
use serde::Deserialize;

use crate::auth::AuthedUser;
use crate::error::ApiResult;
use crate::state::AppState;

/// Unconditional append; no dedup.
pub async fn append(
    State(state): State<Arc<AppState>>,
    AuthedUser(_claims): AuthedUser,
    Json(body): Json<CastVote>,
) -> ApiResult<Json<Vote>> {
    let vote = state.votes.append(body).await?;
    Ok(Json(vote))
}

#[derive(Debug, Deserialize)]
pub struct UpsertVoteRequest {
    pub kind: VoteKind,
}

/// One vote per caller per product; a repeat call replaces the
/// earlier kind.
pub async fn upsert(
    State(state): State<Arc<AppState>>,
    AuthedUser(claims): AuthedUser,
    Path(product_id): Path<String>,
    Json(body): Json<UpsertVoteRequest>,
) -> ApiResult<Json<Vote>> {
    let vote = state
        .votes
        .upsert(CastVote {
            user_email: claims.sub,
            product_id,
            kind: body.kind,
        })
        .await?;
    Ok(Json(vote))
}

#[derive(Debug, Deserialize)]
pub struct TallyQuery {
    pub user: Option<String>,
}

/// Upvote/downvote counts, optionally scoped to one voter via the
/// `user` query parameter. Unknown products tally as zero.
pub async fn tally(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<String>,
    Query(query): Query<TallyQuery>,
) -> ApiResult<Json<VoteTally>> {
    let tally = TallyService::new(state.votes.clone())
        .for_product(&product_id, query.user.as_deref())
        .await?;
    Ok(Json(tally))
}
