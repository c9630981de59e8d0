//! Storage failures mapped into the shared error taxonomy.
//!
//! The db crate defines no error enum of its own. Driver and decode
//! failures surface as [`PulseError::Database`], stored data that no
//! longer parses (an unknown enum string, a record id that is not a
//! UUID) as a corrupt-record variant of the same, and empty query
//! results as [`PulseError::NotFound`].

use pulse_core::error::PulseError;

/// A failed driver call or response decode.
pub(crate) fn storage(err: surrealdb::Error) -> PulseError {
    PulseError::Database(err.to_string())
}

/// Stored data violating an invariant the schema should have upheld.
pub(crate) fn corrupt(detail: impl Into<String>) -> PulseError {
    PulseError::Database(format!("corrupt record: {}", detail.into()))
}

/// The query matched no record.
pub(crate) fn not_found(entity: &str, id: impl Into<String>) -> PulseError {
    PulseError::NotFound {
        entity: entity.into(),
        id: id.into(),
    }
}
