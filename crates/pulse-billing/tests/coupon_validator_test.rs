//! Integration tests for the coupon validator against in-memory
//! SurrealDB.

use chrono::{Duration, Utc};
use pulse_billing::{CouponStanding, CouponValidator};
use pulse_core::models::coupon::CreateCoupon;
use pulse_core::repository::CouponRepository;
use pulse_db::repository::SurrealCouponRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

async fn setup() -> SurrealCouponRepository<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    pulse_db::run_migrations(&db).await.unwrap();
    SurrealCouponRepository::new(db)
}

fn coupon(code: &str, discount: i64, expires_in_days: i64) -> CreateCoupon {
    CreateCoupon {
        code: code.into(),
        discount,
        expires_at: Utc::now() + Duration::days(expires_in_days),
        description: String::new(),
    }
}

#[tokio::test]
async fn valid_coupon_reports_discount() {
    let repo = setup().await;
    repo.create(coupon("SAVE20", 20, 30)).await.unwrap();

    let validator = CouponValidator::new(repo);
    let standing = validator.check("SAVE20").await.unwrap();
    assert_eq!(standing, CouponStanding::Valid { discount: 20 });
}

#[tokio::test]
async fn coupon_expiring_today_is_valid() {
    let repo = setup().await;
    repo.create(coupon("TODAY", 15, 0)).await.unwrap();

    let validator = CouponValidator::new(repo);
    let standing = validator.check("TODAY").await.unwrap();
    assert_eq!(standing, CouponStanding::Valid { discount: 15 });
}

#[tokio::test]
async fn coupon_two_days_past_is_expired() {
    let repo = setup().await;
    repo.create(coupon("STALE", 15, -2)).await.unwrap();

    let validator = CouponValidator::new(repo);
    let standing = validator.check("STALE").await.unwrap();
    assert_eq!(standing, CouponStanding::Expired);
}

#[tokio::test]
async fn unknown_code_is_not_found() {
    let repo = setup().await;
    let validator = CouponValidator::new(repo);

    let standing = validator.check("NOPE").await.unwrap();
    assert_eq!(standing, CouponStanding::NotFound);
}

#[tokio::test]
async fn zero_discount_coupon_is_treated_as_absent() {
    let repo = setup().await;
    repo.create(coupon("FREEBIE", 0, 30)).await.unwrap();

    let validator = CouponValidator::new(repo);
    let standing = validator.check("FREEBIE").await.unwrap();
    assert_eq!(standing, CouponStanding::NotFound);
}

#[tokio::test]
async fn list_active_filters_expired() {
    let repo = setup().await;
    repo.create(coupon("LIVE", 10, 10)).await.unwrap();
    repo.create(coupon("DEAD", 10, -5)).await.unwrap();
    repo.create(coupon("TODAY", 10, 0)).await.unwrap();

    let validator = CouponValidator::new(repo);
    let active = validator.list_active().await.unwrap();

    let codes: Vec<&str> = active.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(active.len(), 2);
    assert!(codes.contains(&"LIVE"));
    assert!(codes.contains(&"TODAY"));
}
