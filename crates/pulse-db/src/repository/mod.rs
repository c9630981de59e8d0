//! SurrealDB repository implementations.

mod coupon;
mod payment;
mod product;
mod report;
mod review;
mod slider;
mod stats;
mod user;
mod vote;

pub use coupon::SurrealCouponRepository;
pub use payment::SurrealPaymentRepository;
pub use product::SurrealProductRepository;
pub use report::SurrealReportRepository;
pub use review::SurrealReviewRepository;
pub use slider::SurrealSliderRepository;
pub use stats::SurrealStatsRepository;
pub use user::SurrealUserRepository;
pub use vote::SurrealVoteRepository;
