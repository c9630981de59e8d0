//! SurrealDB implementation of [`VoteRepository`].
//!
//! Two write modes coexist. `append` creates a fresh record every
//! time, so repeated appends from one user inflate tallies. `upsert`
//! keys the record id on the (user_email, product_id) pair and relies
//! on the store's atomic create-or-update for that id, so the latest
//! kind wins. Tallying counts whatever rows exist and does not
//! distinguish how they were written.

use chrono::{DateTime, Utc};
use pulse_core::error::PulseResult;
use pulse_core::models::vote::{CastVote, ProductTally, Vote, VoteKind, VoteTally};
use pulse_core::repository::VoteRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error;

#[derive(Debug, SurrealValue)]
struct VoteRow {
    user_email: String,
    product_id: String,
    kind: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct TallyRow {
    upvotes: u64,
    downvotes: u64,
}

#[derive(Debug, SurrealValue)]
struct GroupedTallyRow {
    product_id: String,
    upvotes: u64,
    downvotes: u64,
}

fn parse_kind(s: &str) -> PulseResult<VoteKind> {
    match s {
        "Upvote" => Ok(VoteKind::Upvote),
        "Downvote" => Ok(VoteKind::Downvote),
        other => Err(error::corrupt(format!("unknown vote kind: {other}"))),
    }
}

fn kind_to_string(k: &VoteKind) -> &'static str {
    match k {
        VoteKind::Upvote => "Upvote",
        VoteKind::Downvote => "Downvote",
    }
}

impl VoteRow {
    fn into_vote(self, id: String) -> PulseResult<Vote> {
        Ok(Vote {
            id,
            user_email: self.user_email,
            product_id: self.product_id,
            kind: parse_kind(&self.kind)?,
            created_at: self.created_at,
        })
    }
}

/// Record id for the upsert write path: one slot per (user, product).
fn upsert_key(user_email: &str, product_id: &str) -> String {
    format!("{user_email}:{product_id}")
}

/// SurrealDB implementation of the Vote repository.
#[derive(Clone)]
pub struct SurrealVoteRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealVoteRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn write_vote(&self, statement: &str, id: String, input: CastVote) -> PulseResult<Vote> {
        let result = self
            .db
            .query(statement)
            .bind(("id", id.clone()))
            .bind(("user_email", input.user_email))
            .bind(("product_id", input.product_id))
            .bind(("kind", kind_to_string(&input.kind).to_string()))
            .await
            .map_err(error::storage)?;

        let mut result = result.check().map_err(error::storage)?;

        let rows: Vec<VoteRow> = result.take(0).map_err(error::storage)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| error::not_found("vote", id.clone()))?;

        row.into_vote(id)
    }
}

impl<C: Connection> VoteRepository for SurrealVoteRepository<C> {
    async fn append(&self, input: CastVote) -> PulseResult<Vote> {
        let id = Uuid::new_v4().to_string();
        self.write_vote(
            "CREATE type::record('vote', $id) SET \
             user_email = $user_email, \
             product_id = $product_id, \
             kind = $kind",
            id,
            input,
        )
        .await
    }

    async fn upsert(&self, input: CastVote) -> PulseResult<Vote> {
        let id = upsert_key(&input.user_email, &input.product_id);
        self.write_vote(
            "UPSERT type::record('vote', $id) SET \
             user_email = $user_email, \
             product_id = $product_id, \
             kind = $kind",
            id,
            input,
        )
        .await
    }

    async fn tally(&self, product_id: &str, user_email: Option<&str>) -> PulseResult<VoteTally> {
        let mut conditions = vec!["product_id = $product_id"];
        if user_email.is_some() {
            conditions.push("user_email = $user_email");
        }

        let query = format!(
            "SELECT \
             count(kind = 'Upvote') AS upvotes, \
             count(kind = 'Downvote') AS downvotes \
             FROM vote WHERE {} GROUP ALL",
            conditions.join(" AND "),
        );

        let mut builder = self
            .db
            .query(&query)
            .bind(("product_id", product_id.to_string()));
        if let Some(email) = user_email {
            builder = builder.bind(("user_email", email.to_string()));
        }

        let mut result = builder.await.map_err(error::storage)?;
        let rows: Vec<TallyRow> = result.take(0).map_err(error::storage)?;

        // No matching rows (including a malformed or unknown product
        // identifier) tallies as zero rather than an error.
        Ok(rows
            .into_iter()
            .next()
            .map(|r| VoteTally {
                upvotes: r.upvotes,
                downvotes: r.downvotes,
            })
            .unwrap_or_default())
    }

    async fn tally_by_product(&self) -> PulseResult<Vec<ProductTally>> {
        let mut result = self
            .db
            .query(
                "SELECT product_id, \
                 count(kind = 'Upvote') AS upvotes, \
                 count(kind = 'Downvote') AS downvotes \
                 FROM vote GROUP BY product_id",
            )
            .await
            .map_err(error::storage)?;

        let rows: Vec<GroupedTallyRow> = result.take(0).map_err(error::storage)?;

        Ok(rows
            .into_iter()
            .map(|r| ProductTally {
                product_id: r.product_id,
                upvotes: r.upvotes,
                downvotes: r.downvotes,
            })
            .collect())
    }
}
