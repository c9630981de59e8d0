//! ProductPulse Billing — coupon validation and payment-gateway
//! delegation.

pub mod coupon;
pub mod error;
pub mod gateway;

pub use coupon::{CouponStanding, CouponValidator};
pub use error::BillingError;
pub use gateway::{PaymentIntent, StripeGateway};
