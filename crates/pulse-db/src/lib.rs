//! ProductPulse Database — SurrealDB connection setup, schema
//! migrations, and repository implementations.
//!
//! This crate provides:
//! - Connection setup ([`open`], [`DbConfig`])
//! - Schema initialization and migrations ([`run_migrations`],
//!   exposed separately for tests running on the in-memory engine)
//! - SurrealDB implementations of the `pulse-core` repository traits
//!
//! Failures surface as the shared [`pulse_core::PulseError`]
//! taxonomy; the crate defines no error type of its own.

pub mod connection;
mod error;
pub mod repository;
pub mod schema;

pub use connection::{DbConfig, open};
pub use schema::run_migrations;
