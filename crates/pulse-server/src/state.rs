//! Shared application state.
//!
//! The storage context is built once at startup and passed into every
//! handler through axum state; there are no module-level handles.

use std::sync::Arc;

use pulse_auth::AuthConfig;
use pulse_billing::StripeGateway;
use pulse_db::repository::{
    SurrealCouponRepository, SurrealPaymentRepository, SurrealProductRepository,
    SurrealReportRepository, SurrealReviewRepository, SurrealSliderRepository,
    SurrealStatsRepository, SurrealUserRepository, SurrealVoteRepository,
};
use surrealdb::Surreal;

use crate::config::ServerConfig;

/// Connection type used by all repositories in the running server.
pub type Db = surrealdb::engine::remote::ws::Client;

pub struct AppState {
    pub auth: AuthConfig,
    pub users: SurrealUserRepository<Db>,
    pub products: SurrealProductRepository<Db>,
    pub votes: SurrealVoteRepository<Db>,
    pub reviews: SurrealReviewRepository<Db>,
    pub coupons: SurrealCouponRepository<Db>,
    pub reports: SurrealReportRepository<Db>,
    pub payments: SurrealPaymentRepository<Db>,
    pub sliders: SurrealSliderRepository<Db>,
    pub stats: SurrealStatsRepository<Db>,
    pub gateway: StripeGateway,
}

impl AppState {
    pub fn new(config: &ServerConfig, db: Surreal<Db>) -> Arc<Self> {
        Arc::new(Self {
            auth: config.auth.clone(),
            users: SurrealUserRepository::new(db.clone()),
            products: SurrealProductRepository::new(db.clone()),
            votes: SurrealVoteRepository::new(db.clone()),
            reviews: SurrealReviewRepository::new(db.clone()),
            coupons: SurrealCouponRepository::new(db.clone()),
            reports: SurrealReportRepository::new(db.clone()),
            payments: SurrealPaymentRepository::new(db.clone()),
            sliders: SurrealSliderRepository::new(db.clone()),
            stats: SurrealStatsRepository::new(db),
            gateway: StripeGateway::new(config.stripe_secret_key.clone()),
        })
    }
}
