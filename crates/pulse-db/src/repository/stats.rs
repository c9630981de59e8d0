//! SurrealDB implementation of [`StatsRepository`].
//!
//! Every field of a snapshot comes from its own count query. Counts
//! taken under concurrent writes can reflect different points in
//! time; the snapshot is a dashboard convenience, not a consistent
//! read.

use pulse_core::error::PulseResult;
use pulse_core::repository::{AdminSnapshot, OwnerSnapshot, StatsRepository, StatusBreakdown};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;

use crate::error;

#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// SurrealDB implementation of the dashboard statistics queries.
#[derive(Clone)]
pub struct SurrealStatsRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealStatsRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn count(&self, query: &str, email: Option<&str>) -> PulseResult<u64> {
        let mut builder = self.db.query(query);
        if let Some(email) = email {
            builder = builder.bind(("email", email.to_string()));
        }

        let mut result = builder.await.map_err(error::storage)?;
        let rows: Vec<CountRow> = result.take(0).map_err(error::storage)?;
        Ok(rows.first().map(|r| r.total).unwrap_or(0))
    }

    async fn status_breakdown(&self, email: Option<&str>) -> PulseResult<StatusBreakdown> {
        let scope = if email.is_some() {
            " AND owner_email = $email"
        } else {
            ""
        };

        let accepted = self
            .count(
                &format!(
                    "SELECT count() AS total FROM product \
                     WHERE status = 'Accepted'{scope} GROUP ALL"
                ),
                email,
            )
            .await?;
        let pending = self
            .count(
                &format!(
                    "SELECT count() AS total FROM product \
                     WHERE status = 'Pending'{scope} GROUP ALL"
                ),
                email,
            )
            .await?;
        let rejected = self
            .count(
                &format!(
                    "SELECT count() AS total FROM product \
                     WHERE status = 'Rejected'{scope} GROUP ALL"
                ),
                email,
            )
            .await?;

        Ok(StatusBreakdown {
            accepted,
            pending,
            rejected,
        })
    }
}

impl<C: Connection> StatsRepository for SurrealStatsRepository<C> {
    async fn admin_snapshot(&self) -> PulseResult<AdminSnapshot> {
        let users = self
            .count("SELECT count() AS total FROM user GROUP ALL", None)
            .await?;
        let products = self
            .count("SELECT count() AS total FROM product GROUP ALL", None)
            .await?;
        let reviews = self
            .count("SELECT count() AS total FROM review GROUP ALL", None)
            .await?;
        let by_status = self.status_breakdown(None).await?;
        let reported_products = self
            .count(
                "SELECT count() AS total FROM product \
                 WHERE reported = true GROUP ALL",
                None,
            )
            .await?;

        Ok(AdminSnapshot {
            users,
            products,
            reviews,
            by_status,
            reported_products,
        })
    }

    async fn owner_snapshot(&self, email: &str) -> PulseResult<OwnerSnapshot> {
        let products = self
            .count(
                "SELECT count() AS total FROM product \
                 WHERE owner_email = $email GROUP ALL",
                Some(email),
            )
            .await?;
        let by_status = self.status_breakdown(Some(email)).await?;
        let reviews_written = self
            .count(
                "SELECT count() AS total FROM review \
                 WHERE user_email = $email GROUP ALL",
                Some(email),
            )
            .await?;

        Ok(OwnerSnapshot {
            products,
            by_status,
            reviews_written,
        })
    }
}
