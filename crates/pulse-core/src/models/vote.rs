//! Vote domain model.
//!
//! Votes store their product reference as a plain string. The product
//! side uses structured record IDs, so tallying joins the two by text —
//! an unknown or malformed identifier simply matches no rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum VoteKind {
    Upvote,
    Downvote,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    /// Opaque record id. Upserted votes are keyed by the
    /// (user_email, product_id) pair; appended votes get a random id.
    pub id: String,
    pub user_email: String,
    /// Textual product reference (see module docs).
    pub product_id: String,
    pub kind: VoteKind,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastVote {
    pub user_email: String,
    pub product_id: String,
    pub kind: VoteKind,
}

/// Upvote/downvote counts for a single product, optionally scoped to
/// one voter.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteTally {
    pub upvotes: u64,
    pub downvotes: u64,
}

/// Grouped tally row: counts for one product_id as stored on the vote
/// side of the join.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductTally {
    pub product_id: String,
    pub upvotes: u64,
    pub downvotes: u64,
}
