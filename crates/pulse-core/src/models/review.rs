//! Review domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Opaque record id, keyed by the (user_email, product_id) pair.
    pub id: String,
    pub user_email: String,
    pub user_name: String,
    /// Avatar URL shown next to the review.
    pub user_photo: String,
    pub product_id: String,
    pub rating: u32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// One review per (user, product); writing again replaces the previous
/// rating and comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReview {
    pub user_email: String,
    pub user_name: String,
    pub user_photo: String,
    pub product_id: String,
    pub rating: u32,
    pub comment: String,
}
