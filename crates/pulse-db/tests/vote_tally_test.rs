//! Integration tests for vote writes and tallying using in-memory
//! SurrealDB.

use pulse_core::models::vote::{CastVote, VoteKind};
use pulse_core::repository::VoteRepository;
use pulse_db::repository::SurrealVoteRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    pulse_db::run_migrations(&db).await.unwrap();
    db
}

fn vote(user: &str, product: &str, kind: VoteKind) -> CastVote {
    CastVote {
        user_email: user.into(),
        product_id: product.into(),
        kind,
    }
}

#[tokio::test]
async fn tally_counts_matching_rows() {
    let db = setup().await;
    let repo = SurrealVoteRepository::new(db);

    repo.append(vote("a@x.com", "p1", VoteKind::Upvote))
        .await
        .unwrap();
    repo.append(vote("b@x.com", "p1", VoteKind::Upvote))
        .await
        .unwrap();
    repo.append(vote("c@x.com", "p1", VoteKind::Downvote))
        .await
        .unwrap();
    repo.append(vote("a@x.com", "p2", VoteKind::Upvote))
        .await
        .unwrap();

    let tally = repo.tally("p1", None).await.unwrap();
    assert_eq!(tally.upvotes, 2);
    assert_eq!(tally.downvotes, 1);
}

#[tokio::test]
async fn tally_is_insertion_order_independent() {
    let db = setup().await;
    let repo = SurrealVoteRepository::new(db);

    // Same multiset of votes as above, reversed order.
    repo.append(vote("c@x.com", "p1", VoteKind::Downvote))
        .await
        .unwrap();
    repo.append(vote("b@x.com", "p1", VoteKind::Upvote))
        .await
        .unwrap();
    repo.append(vote("a@x.com", "p1", VoteKind::Upvote))
        .await
        .unwrap();

    let tally = repo.tally("p1", None).await.unwrap();
    assert_eq!(tally.upvotes, 2);
    assert_eq!(tally.downvotes, 1);
}

#[tokio::test]
async fn tally_filters_by_user_when_given() {
    let db = setup().await;
    let repo = SurrealVoteRepository::new(db);

    repo.append(vote("a@x.com", "p1", VoteKind::Upvote))
        .await
        .unwrap();
    repo.append(vote("b@x.com", "p1", VoteKind::Downvote))
        .await
        .unwrap();

    let tally = repo.tally("p1", Some("a@x.com")).await.unwrap();
    assert_eq!(tally.upvotes, 1);
    assert_eq!(tally.downvotes, 0);
}

#[tokio::test]
async fn unknown_product_tallies_zero() {
    let db = setup().await;
    let repo = SurrealVoteRepository::new(db);

    repo.append(vote("a@x.com", "p1", VoteKind::Upvote))
        .await
        .unwrap();

    // Unknown and malformed identifiers match no rows; neither is an
    // error.
    let tally = repo.tally("no-such-product", None).await.unwrap();
    assert_eq!(tally.upvotes, 0);
    assert_eq!(tally.downvotes, 0);

    let tally = repo.tally("!!not an id!!", None).await.unwrap();
    assert_eq!(tally.upvotes, 0);
    assert_eq!(tally.downvotes, 0);
}

#[tokio::test]
async fn append_accumulates_duplicates() {
    let db = setup().await;
    let repo = SurrealVoteRepository::new(db);

    // The append path does not dedup; the same user voting twice
    // inflates the count.
    repo.append(vote("a@x.com", "p1", VoteKind::Upvote))
        .await
        .unwrap();
    repo.append(vote("a@x.com", "p1", VoteKind::Upvote))
        .await
        .unwrap();

    let tally = repo.tally("p1", None).await.unwrap();
    assert_eq!(tally.upvotes, 2);
}

#[tokio::test]
async fn upsert_replaces_prior_vote() {
    let db = setup().await;
    let repo = SurrealVoteRepository::new(db);

    repo.upsert(vote("a@x.com", "p1", VoteKind::Upvote))
        .await
        .unwrap();
    repo.upsert(vote("a@x.com", "p1", VoteKind::Downvote))
        .await
        .unwrap();

    // Latest kind wins; exactly one row exists for the pair.
    let tally = repo.tally("p1", Some("a@x.com")).await.unwrap();
    assert_eq!(tally.upvotes, 0);
    assert_eq!(tally.downvotes, 1);
}

#[tokio::test]
async fn grouped_tally_covers_all_voted_products() {
    let db = setup().await;
    let repo = SurrealVoteRepository::new(db);

    repo.append(vote("a@x.com", "p1", VoteKind::Upvote))
        .await
        .unwrap();
    repo.append(vote("b@x.com", "p1", VoteKind::Downvote))
        .await
        .unwrap();
    repo.append(vote("a@x.com", "p2", VoteKind::Downvote))
        .await
        .unwrap();

    let mut grouped = repo.tally_by_product().await.unwrap();
    grouped.sort_by(|a, b| a.product_id.cmp(&b.product_id));

    assert_eq!(grouped.len(), 2);
    assert_eq!(grouped[0].product_id, "p1");
    assert_eq!(grouped[0].upvotes, 1);
    assert_eq!(grouped[0].downvotes, 1);
    assert_eq!(grouped[1].product_id, "p2");
    assert_eq!(grouped[1].upvotes, 0);
    assert_eq!(grouped[1].downvotes, 1);
}
