//! Integration tests for the tally service and trending ranker
//! against in-memory SurrealDB.

use pulse_core::models::product::CreateProduct;
use pulse_core::models::vote::{CastVote, VoteKind};
use pulse_core::repository::{ProductRepository, VoteRepository};
use pulse_db::repository::{SurrealProductRepository, SurrealVoteRepository};
use pulse_feed::{TallyService, TrendingRanker};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

type MemDb = surrealdb::engine::local::Db;

/// Spin up in-memory DB and run migrations.
async fn setup() -> Surreal<MemDb> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    pulse_db::run_migrations(&db).await.unwrap();
    db
}

fn product(name: &str) -> CreateProduct {
    CreateProduct {
        name: name.into(),
        description: String::new(),
        image: String::new(),
        external_link: String::new(),
        tags: vec![],
        owner_name: "Owner".into(),
        owner_email: "owner@example.com".into(),
    }
}

async fn cast(
    votes: &SurrealVoteRepository<MemDb>,
    product_id: &Uuid,
    kind: VoteKind,
    count: usize,
) {
    for i in 0..count {
        votes
            .append(CastVote {
                user_email: format!("voter{i}-{kind:?}@example.com"),
                product_id: product_id.to_string(),
                kind,
            })
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn zero_vote_products_rank_with_zero_tallies() {
    let db = setup().await;
    let products = SurrealProductRepository::new(db.clone());
    let votes = SurrealVoteRepository::new(db.clone());

    let lonely = products.create(product("Lonely")).await.unwrap();

    let ranker = TrendingRanker::new(products, votes);
    let ranked = ranker.top(8).await.unwrap();

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].product.id, lonely.id);
    assert_eq!(ranked[0].upvotes, 0);
    assert_eq!(ranked[0].downvotes, 0);
}

#[tokio::test]
async fn ranks_by_upvotes_not_net_score() {
    let db = setup().await;
    let products = SurrealProductRepository::new(db.clone());
    let votes = SurrealVoteRepository::new(db.clone());

    // A: 3 up / 1 down (net +2). B: 1 up / 5 down (net -4).
    // A wins top-1 on raw upvotes.
    let a = products.create(product("A")).await.unwrap();
    let b = products.create(product("B")).await.unwrap();
    cast(&votes, &a.id, VoteKind::Upvote, 3).await;
    cast(&votes, &a.id, VoteKind::Downvote, 1).await;
    cast(&votes, &b.id, VoteKind::Upvote, 1).await;
    cast(&votes, &b.id, VoteKind::Downvote, 5).await;

    let ranker = TrendingRanker::new(products, votes);
    let top = ranker.top(1).await.unwrap();

    assert_eq!(top.len(), 1);
    assert_eq!(top[0].product.id, a.id);
    assert_eq!(top[0].upvotes, 3);
    assert_eq!(top[0].downvotes, 1);
    assert_eq!(top[0].net_score(), 2);
}

#[tokio::test]
async fn output_is_truncated_and_sorted() {
    let db = setup().await;
    let products = SurrealProductRepository::new(db.clone());
    let votes = SurrealVoteRepository::new(db.clone());

    // Distinct upvote counts so ordering is fully determined.
    for upvotes in [5usize, 1, 4, 0, 2] {
        let p = products
            .create(product(&format!("P{upvotes}")))
            .await
            .unwrap();
        cast(&votes, &p.id, VoteKind::Upvote, upvotes).await;
    }

    let ranker = TrendingRanker::new(products, votes);
    let ranked = ranker.top(4).await.unwrap();

    assert_eq!(ranked.len(), 4);
    let counts: Vec<u64> = ranked.iter().map(|r| r.upvotes).collect();
    assert_eq!(counts, vec![5, 4, 2, 1]);

    // Requesting more than exist returns everything.
    let all = ranker.top(100).await.unwrap();
    assert_eq!(all.len(), 5);
}

#[tokio::test]
async fn votes_without_a_product_do_not_surface() {
    let db = setup().await;
    let products = SurrealProductRepository::new(db.clone());
    let votes = SurrealVoteRepository::new(db.clone());

    products.create(product("Real")).await.unwrap();
    votes
        .append(CastVote {
            user_email: "a@x.com".into(),
            product_id: "orphan-product".into(),
            kind: VoteKind::Upvote,
        })
        .await
        .unwrap();

    let ranker = TrendingRanker::new(products, votes);
    let ranked = ranker.top(8).await.unwrap();

    // Only the real product appears; the orphaned vote row joins to
    // nothing.
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].product.name, "Real");
    assert_eq!(ranked[0].upvotes, 0);
}

#[tokio::test]
async fn tally_service_counts_per_product_and_user() {
    let db = setup().await;
    let products = SurrealProductRepository::new(db.clone());
    let votes = SurrealVoteRepository::new(db.clone());

    let p = products.create(product("P")).await.unwrap();
    let pid = p.id.to_string();
    cast(&votes, &p.id, VoteKind::Upvote, 2).await;
    cast(&votes, &p.id, VoteKind::Downvote, 1).await;

    let tally = TallyService::new(votes);

    let all = tally.for_product(&pid, None).await.unwrap();
    assert_eq!(all.upvotes, 2);
    assert_eq!(all.downvotes, 1);

    let one = tally
        .for_product(&pid, Some("voter0-Upvote@example.com"))
        .await
        .unwrap();
    assert_eq!(one.upvotes, 1);
    assert_eq!(one.downvotes, 0);

    let none = tally.for_product("missing", None).await.unwrap();
    assert_eq!(none.upvotes, 0);
    assert_eq!(none.downvotes, 0);
}
