//! HTTP route layer: every endpoint maps to a single repository or
//! service call.

pub mod coupons;
pub mod feed;
pub mod payments;
pub mod products;
pub mod reports;
pub mod reviews;
pub mod sliders;
pub mod stats;
pub mod token;
pub mod users;
pub mod votes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, patch, post, put};
use pulse_core::repository::Pagination;
use serde::Deserialize;
use tower_http::cors::CorsLayer;

use crate::state::AppState;

/// Common offset/limit query parameters.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

impl PageQuery {
    pub fn pagination(&self) -> Pagination {
        let defaults = Pagination::default();
        Pagination {
            offset: self.offset.unwrap_or(defaults.offset),
            limit: self.limit.unwrap_or(defaults.limit),
        }
    }
}

async fn healthz() -> &'static str {
    "ProductPulse server is running"
}

/// Build the full application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/auth/token", post(token::issue))
        .route("/users", post(users::sign_in).get(users::list))
        .route("/users/{email}", get(users::get))
        .route(
            "/users/{email}/role",
            get(users::role).patch(users::set_role),
        )
        .route("/users/{email}/subscription", patch(users::set_subscription))
        .route("/products", post(products::create).get(products::list))
        .route("/products/reported", get(products::reported))
        .route("/products/status/{status}", get(products::by_status))
        .route("/products/owner/{email}", get(products::by_owner))
        .route(
            "/products/{id}",
            get(products::get)
                .patch(products::update)
                .delete(products::delete),
        )
        .route("/products/{id}/moderate", patch(products::moderate))
        .route("/products/{id}/vote", put(votes::upsert))
        .route("/products/{id}/votes", get(votes::tally))
        .route("/products/{id}/review", put(reviews::upsert))
        .route("/products/{id}/reviews", get(reviews::for_product))
        .route("/feed/trending", get(feed::trending))
        .route("/feed/featured", get(feed::featured))
        .route("/votes", post(votes::append))
        .route("/reviews/author/{email}", get(reviews::by_author))
        .route("/reviews/{id}", delete(reviews::remove))
        .route("/reports", post(reports::create).get(reports::list))
        .route("/reports/{id}", delete(reports::remove))
        .route("/coupons", get(coupons::active).post(coupons::create))
        .route("/coupons/all", get(coupons::all))
        .route(
            "/coupons/{id}",
            patch(coupons::update).delete(coupons::remove),
        )
        .route("/coupons/validate/{code}", get(coupons::validate))
        .route("/payments/intent", post(payments::create_intent))
        .route("/payments", post(payments::record).get(payments::list))
        .route("/payments/user/{email}", get(payments::by_user))
        .route("/sliders", get(sliders::list).post(sliders::create))
        .route("/stats/admin", get(stats::admin))
        .route("/stats/owner/{email}", get(stats::owner))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
