//! Integration tests for the Coupon repository using in-memory
//! SurrealDB.

use chrono::{Duration, Utc};
use pulse_core::models::coupon::{CreateCoupon, UpdateCoupon};
use pulse_core::repository::CouponRepository;
use pulse_db::repository::SurrealCouponRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    pulse_db::run_migrations(&db).await.unwrap();
    db
}

#[tokio::test]
async fn create_and_get_by_code() {
    let db = setup().await;
    let repo = SurrealCouponRepository::new(db);

    let coupon = repo
        .create(CreateCoupon {
            code: "SAVE10".into(),
            discount: 10,
            expires_at: Utc::now() + Duration::days(30),
            description: "Ten off".into(),
        })
        .await
        .unwrap();

    assert_eq!(coupon.code, "SAVE10");
    assert_eq!(coupon.discount, 10);

    let fetched = repo.get_by_code("SAVE10").await.unwrap();
    assert_eq!(fetched.id, coupon.id);
    assert_eq!(fetched.discount, 10);
}

#[tokio::test]
async fn unknown_code_is_not_found() {
    let db = setup().await;
    let repo = SurrealCouponRepository::new(db);

    let result = repo.get_by_code("NOPE").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn update_coupon_discount() {
    let db = setup().await;
    let repo = SurrealCouponRepository::new(db);

    let coupon = repo
        .create(CreateCoupon {
            code: "SAVE10".into(),
            discount: 10,
            expires_at: Utc::now() + Duration::days(30),
            description: "Ten off".into(),
        })
        .await
        .unwrap();

    let updated = repo
        .update(
            coupon.id,
            UpdateCoupon {
                discount: Some(25),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.discount, 25);
    assert_eq!(updated.code, "SAVE10"); // unchanged
}

#[tokio::test]
async fn delete_coupon() {
    let db = setup().await;
    let repo = SurrealCouponRepository::new(db);

    let coupon = repo
        .create(CreateCoupon {
            code: "GONE".into(),
            discount: 5,
            expires_at: Utc::now() + Duration::days(1),
            description: String::new(),
        })
        .await
        .unwrap();

    repo.delete(coupon.id).await.unwrap();
    assert!(repo.get_by_code("GONE").await.is_err());
}

#[tokio::test]
async fn list_returns_all_regardless_of_expiry() {
    let db = setup().await;
    let repo = SurrealCouponRepository::new(db);

    repo.create(CreateCoupon {
        code: "OLD".into(),
        discount: 5,
        expires_at: Utc::now() - Duration::days(10),
        description: String::new(),
    })
    .await
    .unwrap();
    repo.create(CreateCoupon {
        code: "NEW".into(),
        discount: 5,
        expires_at: Utc::now() + Duration::days(10),
        description: String::new(),
    })
    .await
    .unwrap();

    // Expiry filtering is the validator's job, not storage's.
    let all = repo.list().await.unwrap();
    assert_eq!(all.len(), 2);
}
