//! Billing error types.

use pulse_core::error::PulseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BillingError {
    #[error("charge amount must be positive")]
    InvalidAmount,

    #[error("gateway request failed: {0}")]
    Gateway(String),
}

impl From<BillingError> for PulseError {
    fn from(err: BillingError) -> Self {
        match err {
            BillingError::InvalidAmount => PulseError::Validation {
                message: err.to_string(),
            },
            BillingError::Gateway(msg) => PulseError::Payment(msg),
        }
    }
}

impl From<reqwest::Error> for BillingError {
    fn from(err: reqwest::Error) -> Self {
        BillingError::Gateway(err.to_string())
    }
}
