//! Integration tests for the dashboard statistics queries using
//! in-memory SurrealDB.

use pulse_core::models::product::{CreateProduct, ModerateProduct, ProductStatus};
use pulse_core::models::review::CreateReview;
use pulse_core::models::user::SignInUser;
use pulse_core::repository::{
    ProductRepository, ReviewRepository, StatsRepository, UserRepository,
};
use pulse_db::repository::{
    SurrealProductRepository, SurrealReviewRepository, SurrealStatsRepository,
    SurrealUserRepository,
};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    pulse_db::run_migrations(&db).await.unwrap();
    db
}

fn product(name: &str, owner: &str) -> CreateProduct {
    CreateProduct {
        name: name.into(),
        description: String::new(),
        image: String::new(),
        external_link: String::new(),
        tags: vec![],
        owner_name: "Owner".into(),
        owner_email: owner.into(),
    }
}

#[tokio::test]
async fn admin_snapshot_counts_everything() {
    let db = setup().await;
    let users = SurrealUserRepository::new(db.clone());
    let products = SurrealProductRepository::new(db.clone());
    let reviews = SurrealReviewRepository::new(db.clone());
    let stats = SurrealStatsRepository::new(db.clone());

    for email in ["a@x.com", "b@x.com"] {
        users
            .upsert_on_sign_in(SignInUser {
                email: email.into(),
                name: "U".into(),
                photo: String::new(),
            })
            .await
            .unwrap();
    }

    let p1 = products.create(product("P1", "a@x.com")).await.unwrap();
    let p2 = products.create(product("P2", "a@x.com")).await.unwrap();
    products.create(product("P3", "b@x.com")).await.unwrap();

    products
        .moderate(
            p1.id,
            ModerateProduct {
                status: Some(ProductStatus::Accepted),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    products
        .moderate(
            p2.id,
            ModerateProduct {
                status: Some(ProductStatus::Rejected),
                reported: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    reviews
        .upsert(CreateReview {
            user_email: "b@x.com".into(),
            user_name: "B".into(),
            user_photo: String::new(),
            product_id: p1.id.to_string(),
            rating: 5,
            comment: "great".into(),
        })
        .await
        .unwrap();

    let snapshot = stats.admin_snapshot().await.unwrap();
    assert_eq!(snapshot.users, 2);
    assert_eq!(snapshot.products, 3);
    assert_eq!(snapshot.reviews, 1);
    assert_eq!(snapshot.by_status.accepted, 1);
    assert_eq!(snapshot.by_status.pending, 1);
    assert_eq!(snapshot.by_status.rejected, 1);
    assert_eq!(snapshot.reported_products, 1);
}

#[tokio::test]
async fn owner_snapshot_is_scoped() {
    let db = setup().await;
    let products = SurrealProductRepository::new(db.clone());
    let reviews = SurrealReviewRepository::new(db.clone());
    let stats = SurrealStatsRepository::new(db.clone());

    let mine = products.create(product("Mine", "a@x.com")).await.unwrap();
    products.create(product("Mine 2", "a@x.com")).await.unwrap();
    products.create(product("Theirs", "b@x.com")).await.unwrap();

    products
        .moderate(
            mine.id,
            ModerateProduct {
                status: Some(ProductStatus::Accepted),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    reviews
        .upsert(CreateReview {
            user_email: "a@x.com".into(),
            user_name: "A".into(),
            user_photo: String::new(),
            product_id: "p-other".into(),
            rating: 3,
            comment: "ok".into(),
        })
        .await
        .unwrap();

    let snapshot = stats.owner_snapshot("a@x.com").await.unwrap();
    assert_eq!(snapshot.products, 2);
    assert_eq!(snapshot.by_status.accepted, 1);
    assert_eq!(snapshot.by_status.pending, 1);
    assert_eq!(snapshot.by_status.rejected, 0);
    assert_eq!(snapshot.reviews_written, 1);
}
