//! SurrealDB implementation of [`CouponRepository`].
//!
//! Expiry is never evaluated here; callers decide validity at read
//! time against the stored `expires_at`.

use chrono::{DateTime, Utc};
use pulse_core::error::PulseResult;
use pulse_core::models::coupon::{Coupon, CreateCoupon, UpdateCoupon};
use pulse_core::repository::CouponRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error;

#[derive(Debug, SurrealValue)]
struct CouponRow {
    code: String,
    discount: i64,
    expires_at: DateTime<Utc>,
    description: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct CouponRowWithId {
    record_id: String,
    code: String,
    discount: i64,
    expires_at: DateTime<Utc>,
    description: String,
    created_at: DateTime<Utc>,
}

impl CouponRow {
    fn into_coupon(self, id: Uuid) -> Coupon {
        Coupon {
            id,
            code: self.code,
            discount: self.discount,
            expires_at: self.expires_at,
            description: self.description,
            created_at: self.created_at,
        }
    }
}

impl CouponRowWithId {
    fn try_into_coupon(self) -> PulseResult<Coupon> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| error::corrupt(format!("invalid record id: {e}")))?;
        Ok(Coupon {
            id,
            code: self.code,
            discount: self.discount,
            expires_at: self.expires_at,
            description: self.description,
            created_at: self.created_at,
        })
    }
}

/// SurrealDB implementation of the Coupon repository.
#[derive(Clone)]
pub struct SurrealCouponRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealCouponRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> CouponRepository for SurrealCouponRepository<C> {
    async fn create(&self, input: CreateCoupon) -> PulseResult<Coupon> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('coupon', $id) SET \
                 code = $code, \
                 discount = $discount, \
                 expires_at = $expires_at, \
                 description = $description",
            )
            .bind(("id", id_str.clone()))
            .bind(("code", input.code))
            .bind(("discount", input.discount))
            .bind(("expires_at", input.expires_at))
            .bind(("description", input.description))
            .await
            .map_err(error::storage)?;

        let mut result = result
            .check()
            .map_err(error::storage)?;

        let rows: Vec<CouponRow> = result.take(0).map_err(error::storage)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| error::not_found("coupon", id_str))?;

        Ok(row.into_coupon(id))
    }

    async fn get_by_code(&self, code: &str) -> PulseResult<Coupon> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM coupon \
                 WHERE code = $code",
            )
            .bind(("code", code.to_string()))
            .await
            .map_err(error::storage)?;

        let rows: Vec<CouponRowWithId> = result.take(0).map_err(error::storage)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| error::not_found("coupon", format!("code={code}")))?;

        row.try_into_coupon()
    }

    async fn update(&self, id: Uuid, input: UpdateCoupon) -> PulseResult<Coupon> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.code.is_some() {
            sets.push("code = $code");
        }
        if input.discount.is_some() {
            sets.push("discount = $discount");
        }
        if input.expires_at.is_some() {
            sets.push("expires_at = $expires_at");
        }
        if input.description.is_some() {
            sets.push("description = $description");
        }

        let query = format!("UPDATE type::record('coupon', $id) SET {}", sets.join(", "));

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(code) = input.code {
            builder = builder.bind(("code", code));
        }
        if let Some(discount) = input.discount {
            builder = builder.bind(("discount", discount));
        }
        if let Some(expires_at) = input.expires_at {
            builder = builder.bind(("expires_at", expires_at));
        }
        if let Some(description) = input.description {
            builder = builder.bind(("description", description));
        }

        let result = builder.await.map_err(error::storage)?;
        let mut result = result
            .check()
            .map_err(error::storage)?;

        let rows: Vec<CouponRow> = result.take(0).map_err(error::storage)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| error::not_found("coupon", id_str))?;

        Ok(row.into_coupon(id))
    }

    async fn delete(&self, id: Uuid) -> PulseResult<()> {
        self.db
            .query("DELETE type::record('coupon', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(error::storage)?
            .check()
            .map_err(error::storage)?;

        Ok(())
    }

    async fn list(&self) -> PulseResult<Vec<Coupon>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM coupon \
                 ORDER BY expires_at ASC",
            )
            .await
            .map_err(error::storage)?;

        let rows: Vec<CouponRowWithId> = result.take(0).map_err(error::storage)?;

        rows.into_iter().map(|row| row.try_into_coupon()).collect()
    }
}
