//! ProductPulse Feed — vote tallying and trending-rank computation.
//!
//! Generic over the `pulse-core` repository traits so that the
//! ranking logic has no dependency on the database crate.

pub mod tally;
pub mod trending;

pub use tally::TallyService;
pub use trending::{RankedProduct, TrendingRanker};
