//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings. Enums are stored as strings with
//! ASSERT constraints for validation.
//!
//! The vote table deliberately carries NO unique index on
//! (user_email, product_id): one-vote-per-user is enforced only by the
//! upsert write path, and the append path may create duplicates.

use pulse_core::error::{PulseError, PulseResult};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Users
-- =======================================================================
DEFINE TABLE user SCHEMAFULL;
DEFINE FIELD email ON TABLE user TYPE string;
DEFINE FIELD name ON TABLE user TYPE string;
DEFINE FIELD photo ON TABLE user TYPE string;
DEFINE FIELD role ON TABLE user TYPE string \
    ASSERT $value IN ['User', 'Moderator', 'Admin'];
DEFINE FIELD subscription ON TABLE user TYPE string \
    ASSERT $value IN ['Free', 'Verified'];
DEFINE FIELD created_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_user_email ON TABLE user COLUMNS email UNIQUE;

-- =======================================================================
-- Products
-- =======================================================================
DEFINE TABLE product SCHEMAFULL;
DEFINE FIELD name ON TABLE product TYPE string;
DEFINE FIELD description ON TABLE product TYPE string;
DEFINE FIELD image ON TABLE product TYPE string;
DEFINE FIELD external_link ON TABLE product TYPE string;
DEFINE FIELD tags ON TABLE product TYPE array;
DEFINE FIELD tags.* ON TABLE product TYPE string;
DEFINE FIELD owner_name ON TABLE product TYPE string;
DEFINE FIELD owner_email ON TABLE product TYPE string;
DEFINE FIELD status ON TABLE product TYPE string \
    ASSERT $value IN ['Pending', 'Accepted', 'Rejected'];
DEFINE FIELD featured ON TABLE product TYPE bool DEFAULT false;
DEFINE FIELD reported ON TABLE product TYPE bool DEFAULT false;
DEFINE FIELD created_at ON TABLE product TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE product TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_product_owner ON TABLE product COLUMNS owner_email;
DEFINE INDEX idx_product_status ON TABLE product COLUMNS status;

-- =======================================================================
-- Votes
-- =======================================================================
-- product_id is a plain string: the text side of the tally join.
-- No unique (user_email, product_id) index on purpose.
DEFINE TABLE vote SCHEMAFULL;
DEFINE FIELD user_email ON TABLE vote TYPE string;
DEFINE FIELD product_id ON TABLE vote TYPE string;
DEFINE FIELD kind ON TABLE vote TYPE string \
    ASSERT $value IN ['Upvote', 'Downvote'];
DEFINE FIELD created_at ON TABLE vote TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_vote_product ON TABLE vote COLUMNS product_id;

-- =======================================================================
-- Reviews
-- =======================================================================
DEFINE TABLE review SCHEMAFULL;
DEFINE FIELD user_email ON TABLE review TYPE string;
DEFINE FIELD user_name ON TABLE review TYPE string;
DEFINE FIELD user_photo ON TABLE review TYPE string;
DEFINE FIELD product_id ON TABLE review TYPE string;
DEFINE FIELD rating ON TABLE review TYPE int \
    ASSERT $value >= 1 AND $value <= 5;
DEFINE FIELD comment ON TABLE review TYPE string;
DEFINE FIELD created_at ON TABLE review TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_review_product ON TABLE review COLUMNS product_id;
DEFINE INDEX idx_review_author ON TABLE review COLUMNS user_email;

-- =======================================================================
-- Coupons
-- =======================================================================
DEFINE TABLE coupon SCHEMAFULL;
DEFINE FIELD code ON TABLE coupon TYPE string;
DEFINE FIELD discount ON TABLE coupon TYPE int;
DEFINE FIELD expires_at ON TABLE coupon TYPE datetime;
DEFINE FIELD description ON TABLE coupon TYPE string;
DEFINE FIELD created_at ON TABLE coupon TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_coupon_code ON TABLE coupon COLUMNS code UNIQUE;

-- =======================================================================
-- Reports (append-only)
-- =======================================================================
DEFINE TABLE report SCHEMAFULL
    PERMISSIONS
        FOR create FULL
        FOR select FULL
        FOR update NONE
        FOR delete FULL;
DEFINE FIELD product_id ON TABLE report TYPE string;
DEFINE FIELD user_email ON TABLE report TYPE string;
DEFINE FIELD reason ON TABLE report TYPE string;
DEFINE FIELD created_at ON TABLE report TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_report_product ON TABLE report COLUMNS product_id;

-- =======================================================================
-- Payments (append-only log)
-- =======================================================================
DEFINE TABLE payment SCHEMAFULL
    PERMISSIONS
        FOR create FULL
        FOR select FULL
        FOR update NONE
        FOR delete NONE;
DEFINE FIELD user_email ON TABLE payment TYPE string;
DEFINE FIELD amount ON TABLE payment TYPE int;
DEFINE FIELD currency ON TABLE payment TYPE string;
DEFINE FIELD transaction_id ON TABLE payment TYPE string;
DEFINE FIELD created_at ON TABLE payment TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_payment_user ON TABLE payment COLUMNS user_email;

-- =======================================================================
-- Sliders (homepage carousel)
-- =======================================================================
DEFINE TABLE slider SCHEMAFULL;
DEFINE FIELD title ON TABLE slider TYPE string;
DEFINE FIELD image ON TABLE slider TYPE string;
DEFINE FIELD link ON TABLE slider TYPE string;
DEFINE FIELD position ON TABLE slider TYPE int;
DEFINE FIELD created_at ON TABLE slider TYPE datetime \
    DEFAULT time::now();
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
/// All DEFINE statements are idempotent so re-running is safe.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> PulseResult<()> {
    // Ensure migration tracking table exists (idempotent).
    db.query(MIGRATION_TABLE_DDL)
        .await
        .map_err(error::storage)?
        .check()
        .map_err(error::storage)?;

    // Determine current schema version.
    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await
        .map_err(error::storage)?;
    let records: Vec<MigrationRecord> = result.take(0).map_err(error::storage)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql)
                .await
                .map_err(error::storage)?
                .check()
                .map_err(|e| {
                    PulseError::Database(format!(
                        "migration v{} '{}' failed: {e}",
                        migration.version, migration.name,
                    ))
                })?;

            // Record the applied migration.
            db.query(
                "CREATE _migration SET version = $version, \
                 name = $name",
            )
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await
            .map_err(error::storage)?
            .check()
            .map_err(|e| {
                PulseError::Database(format!(
                    "failed to record migration v{}: {e}",
                    migration.version,
                ))
            })?;

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_v1_is_nonempty() {
        assert!(!SCHEMA_V1.is_empty());
    }

    #[test]
    fn migrations_are_ordered() {
        for window in MIGRATIONS.windows(2) {
            assert!(
                window[0].version < window[1].version,
                "Migrations must be in ascending version order"
            );
        }
    }

    #[test]
    fn vote_table_has_no_unique_user_product_index() {
        // Dedup is upsert-path-only; a unique index would reject the
        // append write mode.
        assert!(!SCHEMA_V1.contains("idx_vote_user_product"));
    }
}
