//! SurrealDB implementation of [`ReportRepository`].

use chrono::{DateTime, Utc};
use pulse_core::error::PulseResult;
use pulse_core::models::report::{CreateReport, Report};
use pulse_core::repository::ReportRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error;

#[derive(Debug, SurrealValue)]
struct ReportRow {
    product_id: String,
    user_email: String,
    reason: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct ReportRowWithId {
    record_id: String,
    product_id: String,
    user_email: String,
    reason: String,
    created_at: DateTime<Utc>,
}

impl ReportRowWithId {
    fn try_into_report(self) -> PulseResult<Report> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| error::corrupt(format!("invalid record id: {e}")))?;
        Ok(Report {
            id,
            product_id: self.product_id,
            user_email: self.user_email,
            reason: self.reason,
            created_at: self.created_at,
        })
    }
}

/// SurrealDB implementation of the Report repository.
#[derive(Clone)]
pub struct SurrealReportRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealReportRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn list_query(&self, query: String, bind: Option<(&str, &str)>) -> PulseResult<Vec<Report>> {
        let mut builder = self.db.query(&query);
        if let Some((key, value)) = bind {
            builder = builder.bind((key.to_string(), value.to_string()));
        }

        let mut result = builder.await.map_err(error::storage)?;
        let rows: Vec<ReportRowWithId> = result.take(0).map_err(error::storage)?;

        rows.into_iter().map(|row| row.try_into_report()).collect()
    }
}

impl<C: Connection> ReportRepository for SurrealReportRepository<C> {
    async fn append(&self, input: CreateReport) -> PulseResult<Report> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('report', $id) SET \
                 product_id = $product_id, \
                 user_email = $user_email, \
                 reason = $reason",
            )
            .bind(("id", id_str.clone()))
            .bind(("product_id", input.product_id))
            .bind(("user_email", input.user_email))
            .bind(("reason", input.reason))
            .await
            .map_err(error::storage)?;

        let mut result = result
            .check()
            .map_err(error::storage)?;

        let rows: Vec<ReportRow> = result.take(0).map_err(error::storage)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| error::not_found("report", id_str))?;

        Ok(Report {
            id,
            product_id: row.product_id,
            user_email: row.user_email,
            reason: row.reason,
            created_at: row.created_at,
        })
    }

    async fn list(&self) -> PulseResult<Vec<Report>> {
        self.list_query(
            "SELECT meta::id(id) AS record_id, * FROM report \
             ORDER BY created_at DESC"
                .into(),
            None,
        )
        .await
    }

    async fn list_for_product(&self, product_id: &str) -> PulseResult<Vec<Report>> {
        self.list_query(
            "SELECT meta::id(id) AS record_id, * FROM report \
             WHERE product_id = $product_id \
             ORDER BY created_at DESC"
                .into(),
            Some(("product_id", product_id)),
        )
        .await
    }

    async fn delete(&self, id: Uuid) -> PulseResult<()> {
        self.db
            .query("DELETE type::record('report', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(error::storage)?
            .check()
            .map_err(error::storage)?;

        Ok(())
    }
}
