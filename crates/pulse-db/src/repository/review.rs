//! SurrealDB implementation of [`ReviewRepository`].
//!
//! Reviews are keyed by the (user_email, product_id) pair, so writing
//! again replaces the author's earlier review of the same product.

use chrono::{DateTime, Utc};
use pulse_core::error::PulseResult;
use pulse_core::models::review::{CreateReview, Review};
use pulse_core::repository::ReviewRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;

use crate::error;

#[derive(Debug, SurrealValue)]
struct ReviewRow {
    user_email: String,
    user_name: String,
    user_photo: String,
    product_id: String,
    rating: u32,
    comment: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct ReviewRowWithId {
    record_id: String,
    user_email: String,
    user_name: String,
    user_photo: String,
    product_id: String,
    rating: u32,
    comment: String,
    created_at: DateTime<Utc>,
}

impl ReviewRow {
    fn into_review(self, id: String) -> Review {
        Review {
            id,
            user_email: self.user_email,
            user_name: self.user_name,
            user_photo: self.user_photo,
            product_id: self.product_id,
            rating: self.rating,
            comment: self.comment,
            created_at: self.created_at,
        }
    }
}

impl ReviewRowWithId {
    fn into_review(self) -> Review {
        Review {
            id: self.record_id,
            user_email: self.user_email,
            user_name: self.user_name,
            user_photo: self.user_photo,
            product_id: self.product_id,
            rating: self.rating,
            comment: self.comment,
            created_at: self.created_at,
        }
    }
}

/// SurrealDB implementation of the Review repository.
#[derive(Clone)]
pub struct SurrealReviewRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealReviewRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn list_where(&self, condition: &str, value: (&str, &str)) -> PulseResult<Vec<Review>> {
        let query = format!(
            "SELECT meta::id(id) AS record_id, * FROM review \
             WHERE {condition} \
             ORDER BY created_at DESC",
        );

        let mut result = self
            .db
            .query(&query)
            .bind((value.0.to_string(), value.1.to_string()))
            .await
            .map_err(error::storage)?;

        let rows: Vec<ReviewRowWithId> = result.take(0).map_err(error::storage)?;
        Ok(rows.into_iter().map(|r| r.into_review()).collect())
    }
}

impl<C: Connection> ReviewRepository for SurrealReviewRepository<C> {
    async fn upsert(&self, input: CreateReview) -> PulseResult<Review> {
        let id = format!("{}:{}", input.user_email, input.product_id);

        let result = self
            .db
            .query(
                "UPSERT type::record('review', $id) SET \
                 user_email = $user_email, \
                 user_name = $user_name, \
                 user_photo = $user_photo, \
                 product_id = $product_id, \
                 rating = $rating, \
                 comment = $comment",
            )
            .bind(("id", id.clone()))
            .bind(("user_email", input.user_email))
            .bind(("user_name", input.user_name))
            .bind(("user_photo", input.user_photo))
            .bind(("product_id", input.product_id))
            .bind(("rating", input.rating))
            .bind(("comment", input.comment))
            .await
            .map_err(error::storage)?;

        let mut result = result
            .check()
            .map_err(error::storage)?;

        let rows: Vec<ReviewRow> = result.take(0).map_err(error::storage)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| error::not_found("review", id.clone()))?;

        Ok(row.into_review(id))
    }

    async fn list_for_product(&self, product_id: &str) -> PulseResult<Vec<Review>> {
        self.list_where("product_id = $product_id", ("product_id", product_id))
            .await
    }

    async fn list_by_author(&self, email: &str) -> PulseResult<Vec<Review>> {
        self.list_where("user_email = $user_email", ("user_email", email))
            .await
    }

    async fn delete(&self, id: &str) -> PulseResult<()> {
        self.db
            .query("DELETE type::record('review', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(error::storage)?
            .check()
            .map_err(error::storage)?;

        Ok(())
    }
}
