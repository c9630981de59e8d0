//! Error types for the ProductPulse system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PulseError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Entity already exists: {entity}")]
    AlreadyExists { entity: String },

    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("Authorization denied: {reason}")]
    AuthorizationDenied { reason: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Payment gateway error: {0}")]
    Payment(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type PulseResult<T> = Result<T, PulseError>;
