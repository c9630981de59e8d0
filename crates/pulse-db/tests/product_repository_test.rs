//! Integration tests for the Product repository using in-memory
//! SurrealDB.

use pulse_core::models::product::{CreateProduct, ModerateProduct, ProductStatus, UpdateProduct};
use pulse_core::models::report::CreateReport;
use pulse_core::models::review::CreateReview;
use pulse_core::repository::{
    Pagination, ProductRepository, ReportRepository, ReviewRepository,
};
use pulse_db::repository::{
    SurrealProductRepository, SurrealReportRepository, SurrealReviewRepository,
};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

/// Helper: spin up in-memory DB and run migrations.
async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    pulse_db::run_migrations(&db).await.unwrap();
    db
}

fn sample_product(name: &str, owner: &str) -> CreateProduct {
    CreateProduct {
        name: name.into(),
        description: "A small tool".into(),
        image: "https://img.example/p.png".into(),
        external_link: "https://example.com".into(),
        tags: vec!["tech".into(), "ai".into()],
        owner_name: "Alice".into(),
        owner_email: owner.into(),
    }
}

#[tokio::test]
async fn create_starts_pending() {
    let db = setup().await;
    let repo = SurrealProductRepository::new(db);

    let product = repo
        .create(sample_product("Widget", "alice@example.com"))
        .await
        .unwrap();

    assert_eq!(product.name, "Widget");
    assert_eq!(product.status, ProductStatus::Pending);
    assert!(!product.featured);
    assert!(!product.reported);

    let fetched = repo.get_by_id(product.id).await.unwrap();
    assert_eq!(fetched.id, product.id);
    assert_eq!(fetched.status, ProductStatus::Pending);
}

#[tokio::test]
async fn owner_edit_keeps_moderation_flags() {
    let db = setup().await;
    let repo = SurrealProductRepository::new(db);

    let product = repo
        .create(sample_product("Widget", "alice@example.com"))
        .await
        .unwrap();

    repo.moderate(
        product.id,
        ModerateProduct {
            status: Some(ProductStatus::Accepted),
            featured: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let updated = repo
        .update_details(
            product.id,
            UpdateProduct {
                name: Some("Widget 2".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Widget 2");
    assert_eq!(updated.status, ProductStatus::Accepted);
    assert!(updated.featured);
}

#[tokio::test]
async fn featured_excludes_non_accepted() {
    let db = setup().await;
    let repo = SurrealProductRepository::new(db);

    let accepted = repo
        .create(sample_product("Accepted", "a@example.com"))
        .await
        .unwrap();
    let pending = repo
        .create(sample_product("Pending", "b@example.com"))
        .await
        .unwrap();
    let rejected = repo
        .create(sample_product("Rejected", "c@example.com"))
        .await
        .unwrap();

    // All three carry the featured flag; only one is accepted.
    for p in [&accepted, &pending, &rejected] {
        repo.moderate(
            p.id,
            ModerateProduct {
                featured: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    }
    repo.moderate(
        accepted.id,
        ModerateProduct {
            status: Some(ProductStatus::Accepted),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    repo.moderate(
        rejected.id,
        ModerateProduct {
            status: Some(ProductStatus::Rejected),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let featured = repo.list_featured().await.unwrap();
    assert_eq!(featured.len(), 1);
    assert_eq!(featured[0].id, accepted.id);
}

#[tokio::test]
async fn accepted_listing_is_paginated() {
    let db = setup().await;
    let repo = SurrealProductRepository::new(db);

    for i in 0..5 {
        let p = repo
            .create(sample_product(&format!("P{i}"), "a@example.com"))
            .await
            .unwrap();
        repo.moderate(
            p.id,
            ModerateProduct {
                status: Some(ProductStatus::Accepted),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    }

    let page = repo
        .list_accepted(Pagination {
            offset: 0,
            limit: 3,
        })
        .await
        .unwrap();
    assert_eq!(page.items.len(), 3);
    assert_eq!(page.total, 5);
}

#[tokio::test]
async fn tag_search_only_matches_accepted_with_tag() {
    let db = setup().await;
    let repo = SurrealProductRepository::new(db);

    let hit = repo
        .create(sample_product("Hit", "a@example.com"))
        .await
        .unwrap();
    repo.moderate(
        hit.id,
        ModerateProduct {
            status: Some(ProductStatus::Accepted),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    // Accepted but without the tag.
    let other = repo
        .create(CreateProduct {
            tags: vec!["games".into()],
            ..sample_product("Other", "a@example.com")
        })
        .await
        .unwrap();
    repo.moderate(
        other.id,
        ModerateProduct {
            status: Some(ProductStatus::Accepted),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    // Tagged but still pending.
    repo.create(sample_product("Pending", "a@example.com"))
        .await
        .unwrap();

    let results = repo
        .search_by_tag("ai", Pagination::default())
        .await
        .unwrap();
    assert_eq!(results.items.len(), 1);
    assert_eq!(results.items[0].id, hit.id);
}

#[tokio::test]
async fn delete_cascades_to_reviews_and_reports() {
    let db = setup().await;
    let products = SurrealProductRepository::new(db.clone());
    let reviews = SurrealReviewRepository::new(db.clone());
    let reports = SurrealReportRepository::new(db.clone());

    let product = products
        .create(sample_product("Doomed", "a@example.com"))
        .await
        .unwrap();
    let pid = product.id.to_string();

    for i in 0..3 {
        reviews
            .upsert(CreateReview {
                user_email: format!("reviewer{i}@example.com"),
                user_name: format!("Reviewer {i}"),
                user_photo: String::new(),
                product_id: pid.clone(),
                rating: 4,
                comment: "fine".into(),
            })
            .await
            .unwrap();
    }
    for i in 0..2 {
        reports
            .append(CreateReport {
                product_id: pid.clone(),
                user_email: format!("reporter{i}@example.com"),
                reason: "spam".into(),
            })
            .await
            .unwrap();
    }

    assert_eq!(reviews.list_for_product(&pid).await.unwrap().len(), 3);
    assert_eq!(reports.list_for_product(&pid).await.unwrap().len(), 2);

    products.delete_cascade(product.id).await.unwrap();

    assert!(products.get_by_id(product.id).await.is_err());
    assert!(reviews.list_for_product(&pid).await.unwrap().is_empty());
    assert!(reports.list_for_product(&pid).await.unwrap().is_empty());
}

#[tokio::test]
async fn reported_listing_tracks_flag() {
    let db = setup().await;
    let repo = SurrealProductRepository::new(db);

    let product = repo
        .create(sample_product("Flagged", "a@example.com"))
        .await
        .unwrap();
    repo.create(sample_product("Clean", "a@example.com"))
        .await
        .unwrap();

    repo.moderate(
        product.id,
        ModerateProduct {
            reported: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let reported = repo.list_reported().await.unwrap();
    assert_eq!(reported.len(), 1);
    assert_eq!(reported[0].id, product.id);
}
