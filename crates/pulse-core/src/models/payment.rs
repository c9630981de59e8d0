//! Payment domain model. Append-only log of completed transactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub user_email: String,
    /// Amount in cents.
    pub amount: i64,
    pub currency: String,
    /// Gateway-side transaction identifier.
    pub transaction_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePayment {
    pub user_email: String,
    pub amount: i64,
    pub currency: String,
    pub transaction_id: String,
}
