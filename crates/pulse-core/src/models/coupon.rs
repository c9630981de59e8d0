//! Coupon domain model.
//!
//! Validity is computed at read time from `expires_at`; it is never
//! stored as a derived flag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coupon {
    pub id: Uuid,
    pub code: String,
    /// Discount amount in whole currency units.
    pub discount: i64,
    pub expires_at: DateTime<Utc>,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCoupon {
    pub code: String,
    pub discount: i64,
    pub expires_at: DateTime<Utc>,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateCoupon {
    pub code: Option<String>,
    pub discount: Option<i64>,
    pub expires_at: Option<DateTime<Utc>>,
    pub description: Option<String>,
}
