//! SurrealDB implementation of [`PaymentRepository`]. Append-only.

use chrono::{DateTime, Utc};
use pulse_core::error::PulseResult;
use pulse_core::models::payment::{CreatePayment, Payment};
use pulse_core::repository::{PaginatedResult, Pagination, PaymentRepository};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error;

#[derive(Debug, SurrealValue)]
struct PaymentRow {
    user_email: String,
    amount: i64,
    currency: String,
    transaction_id: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct PaymentRowWithId {
    record_id: String,
    user_email: String,
    amount: i64,
    currency: String,
    transaction_id: String,
    created_at: DateTime<Utc>,
}

impl PaymentRowWithId {
    fn try_into_payment(self) -> PulseResult<Payment> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| error::corrupt(format!("invalid record id: {e}")))?;
        Ok(Payment {
            id,
            user_email: self.user_email,
            amount: self.amount,
            currency: self.currency,
            transaction_id: self.transaction_id,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// SurrealDB implementation of the Payment repository.
#[derive(Clone)]
pub struct SurrealPaymentRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealPaymentRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> PaymentRepository for SurrealPaymentRepository<C> {
    async fn append(&self, input: CreatePayment) -> PulseResult<Payment> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('payment', $id) SET \
                 user_email = $user_email, \
                 amount = $amount, \
                 currency = $currency, \
                 transaction_id = $transaction_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("user_email", input.user_email))
            .bind(("amount", input.amount))
            .bind(("currency", input.currency))
            .bind(("transaction_id", input.transaction_id))
            .await
            .map_err(error::storage)?;

        let mut result = result
            .check()
            .map_err(error::storage)?;

        let rows: Vec<PaymentRow> = result.take(0).map_err(error::storage)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| error::not_found("payment", id_str))?;

        Ok(Payment {
            id,
            user_email: row.user_email,
            amount: row.amount,
            currency: row.currency,
            transaction_id: row.transaction_id,
            created_at: row.created_at,
        })
    }

    async fn list(&self, pagination: Pagination) -> PulseResult<PaginatedResult<Payment>> {
        let mut count_result = self
            .db
            .query("SELECT count() AS total FROM payment GROUP ALL")
            .await
            .map_err(error::storage)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(error::storage)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM payment \
                 ORDER BY created_at DESC \
                 LIMIT $limit START $offset",
            )
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(error::storage)?;

        let rows: Vec<PaymentRowWithId> = result.take(0).map_err(error::storage)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_payment())
            .collect::<PulseResult<Vec<_>>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }

    async fn list_by_user(&self, email: &str) -> PulseResult<Vec<Payment>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM payment \
                 WHERE user_email = $user_email \
                 ORDER BY created_at DESC",
            )
            .bind(("user_email", email.to_string()))
            .await
            .map_err(error::storage)?;

        let rows: Vec<PaymentRowWithId> = result.take(0).map_err(error::storage)?;

        rows.into_iter().map(|row| row.try_into_payment()).collect()
    }
}
