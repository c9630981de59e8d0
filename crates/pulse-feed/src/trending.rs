//! Trending-rank computation.
//!
//! The ranking joins products to their vote tallies by text: the vote
//! side stores product references as plain strings, so each product's
//! structured id is rendered to a string before lookup. Products with
//! no matching votes stay in the working set with zero tallies
//! instead of being dropped by the join.

use std::collections::HashMap;

use pulse_core::error::PulseResult;
use pulse_core::models::product::Product;
use pulse_core::repository::{ProductRepository, VoteRepository};
use serde::Serialize;

/// A product annotated with its computed vote totals.
#[derive(Debug, Clone, Serialize)]
pub struct RankedProduct {
    #[serde(flatten)]
    pub product: Product,
    pub upvotes: u64,
    pub downvotes: u64,
}

impl RankedProduct {
    /// Upvotes minus downvotes. Exposed for display; the ranking
    /// itself orders by raw upvotes.
    pub fn net_score(&self) -> i64 {
        self.upvotes as i64 - self.downvotes as i64
    }
}

/// Computes the top-K products by vote count.
///
/// Generic over repository implementations so the ranking logic can
/// be exercised against any store.
pub struct TrendingRanker<P: ProductRepository, V: VoteRepository> {
    products: P,
    votes: V,
}

impl<P: ProductRepository, V: VoteRepository> TrendingRanker<P, V> {
    pub fn new(products: P, votes: V) -> Self {
        Self { products, votes }
    }

    /// Return at most `limit` products ordered by upvote count,
    /// highest first.
    ///
    /// No status filter is applied: pending and rejected listings
    /// rank alongside accepted ones. The sort is stable, so products
    /// with equal upvote counts keep their store-native order —
    /// callers must not rely on tie order.
    pub async fn top(&self, limit: usize) -> PulseResult<Vec<RankedProduct>> {
        let products = self.products.list_all().await?;
        let tallies = self.votes.tally_by_product().await?;

        let mut by_product: HashMap<String, (u64, u64)> = tallies
            .into_iter()
            .map(|t| (t.product_id, (t.upvotes, t.downvotes)))
            .collect();

        let mut ranked: Vec<RankedProduct> = products
            .into_iter()
            .map(|product| {
                let (upvotes, downvotes) = by_product
                    .remove(&product.id.to_string())
                    .unwrap_or((0, 0));
                RankedProduct {
                    product,
                    upvotes,
                    downvotes,
                }
            })
            .collect();

        // Ordering by raw upvotes, not net score: a heavily
        // downvoted product still trends if enough people upvoted it.
        ranked.sort_by(|a, b| b.upvotes.cmp(&a.upvotes));
        ranked.truncate(limit);

        Ok(ranked)
    }
}
