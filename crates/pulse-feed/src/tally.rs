//! Vote tally service.

use pulse_core::error::PulseResult;
use pulse_core::models::vote::VoteTally;
use pulse_core::repository::VoteRepository;

/// Read-only tally lookups over the vote store.
///
/// A tally is a plain count of matching vote rows: it does not
/// distinguish between appended and upserted votes, so duplicates
/// written through the append path are counted as-is.
pub struct TallyService<V: VoteRepository> {
    votes: V,
}

impl<V: VoteRepository> TallyService<V> {
    pub fn new(votes: V) -> Self {
        Self { votes }
    }

    /// Upvote/downvote counts for one product, optionally restricted
    /// to a single voter.
    ///
    /// A product identifier that matches no rows — including one that
    /// is outright malformed — yields zero counts, not an error.
    pub async fn for_product(
        &self,
        product_id: &str,
        user_email: Option<&str>,
    ) -> PulseResult<VoteTally> {
        self.votes.tally(product_id, user_email).await
    }
}
