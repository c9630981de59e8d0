//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. The storage context is passed
//! explicitly into each implementation at construction time; no
//! module-level handles exist anywhere in the system.

use serde::Serialize;
use uuid::Uuid;

use crate::error::PulseResult;
use crate::models::{
    coupon::{Coupon, CreateCoupon, UpdateCoupon},
    payment::{CreatePayment, Payment},
    product::{CreateProduct, ModerateProduct, Product, ProductStatus, UpdateProduct},
    report::{CreateReport, Report},
    review::{CreateReview, Review},
    slider::{CreateSlider, Slider},
    user::{SignInUser, SubscriptionStatus, User, UserRole},
    vote::{CastVote, ProductTally, Vote, VoteTally},
};

/// Pagination parameters for list queries.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 20,
        }
    }
}

/// A paginated result set.
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

pub trait UserRepository: Send + Sync {
    /// Create the user on first sign-in. If the email is already
    /// registered, return the stored user unchanged.
    fn upsert_on_sign_in(&self, input: SignInUser) -> impl Future<Output = PulseResult<User>> + Send;
    fn get_by_email(&self, email: &str) -> impl Future<Output = PulseResult<User>> + Send;
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = PulseResult<PaginatedResult<User>>> + Send;
    /// Role changes are admin-gated at the HTTP layer.
    fn set_role(&self, email: &str, role: UserRole)
    -> impl Future<Output = PulseResult<User>> + Send;
    fn set_subscription(
        &self,
        email: &str,
        subscription: SubscriptionStatus,
    ) -> impl Future<Output = PulseResult<User>> + Send;
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

pub trait ProductRepository: Send + Sync {
    /// New listings always start in `Pending` status.
    fn create(&self, input: CreateProduct) -> impl Future<Output = PulseResult<Product>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = PulseResult<Product>> + Send;
    /// Every product regardless of status, for ranking.
    fn list_all(&self) -> impl Future<Output = PulseResult<Vec<Product>>> + Send;
    /// Public listing: accepted products, newest first.
    fn list_accepted(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = PulseResult<PaginatedResult<Product>>> + Send;
    /// Accepted products carrying the given tag.
    fn search_by_tag(
        &self,
        tag: &str,
        pagination: Pagination,
    ) -> impl Future<Output = PulseResult<PaginatedResult<Product>>> + Send;
    fn list_by_owner(&self, email: &str) -> impl Future<Output = PulseResult<Vec<Product>>> + Send;
    fn list_by_status(
        &self,
        status: ProductStatus,
    ) -> impl Future<Output = PulseResult<Vec<Product>>> + Send;
    /// Exact filter: status = Accepted AND featured = true. No ranking.
    fn list_featured(&self) -> impl Future<Output = PulseResult<Vec<Product>>> + Send;
    fn list_reported(&self) -> impl Future<Output = PulseResult<Vec<Product>>> + Send;
    /// Owner edit of descriptive fields.
    fn update_details(
        &self,
        id: Uuid,
        input: UpdateProduct,
    ) -> impl Future<Output = PulseResult<Product>> + Send;
    /// Moderator flags: status, featured, reported.
    fn moderate(
        &self,
        id: Uuid,
        input: ModerateProduct,
    ) -> impl Future<Output = PulseResult<Product>> + Send;
    /// Delete the product and then its reviews and reports. The steps
    /// are sequential, not transactional; a crash mid-way can leave
    /// orphaned children.
    fn delete_cascade(&self, id: Uuid) -> impl Future<Output = PulseResult<()>> + Send;
}

// ---------------------------------------------------------------------------
// Votes
// ---------------------------------------------------------------------------

pub trait VoteRepository: Send + Sync {
    /// Unconditional insert. No dedup: repeated appends from the same
    /// user accumulate and inflate tallies.
    fn append(&self, input: CastVote) -> impl Future<Output = PulseResult<Vote>> + Send;
    /// Store-side upsert keyed by (user_email, product_id); replaces
    /// any prior vote kind for that pair in a single statement.
    fn upsert(&self, input: CastVote) -> impl Future<Output = PulseResult<Vote>> + Send;
    /// Count matching rows. An unknown or malformed product id matches
    /// nothing and yields zero counts rather than an error.
    fn tally(
        &self,
        product_id: &str,
        user_email: Option<&str>,
    ) -> impl Future<Output = PulseResult<VoteTally>> + Send;
    /// Grouped counts for every product_id present in the vote table.
    fn tally_by_product(&self) -> impl Future<Output = PulseResult<Vec<ProductTally>>> + Send;
}

// ---------------------------------------------------------------------------
// Reviews
// ---------------------------------------------------------------------------

pub trait ReviewRepository: Send + Sync {
    /// One review per (user_email, product_id); keyed upsert.
    fn upsert(&self, input: CreateReview) -> impl Future<Output = PulseResult<Review>> + Send;
    fn list_for_product(
        &self,
        product_id: &str,
    ) -> impl Future<Output = PulseResult<Vec<Review>>> + Send;
    fn list_by_author(&self, email: &str) -> impl Future<Output = PulseResult<Vec<Review>>> + Send;
    fn delete(&self, id: &str) -> impl Future<Output = PulseResult<()>> + Send;
}

// ---------------------------------------------------------------------------
// Coupons
// ---------------------------------------------------------------------------

pub trait CouponRepository: Send + Sync {
    fn create(&self, input: CreateCoupon) -> impl Future<Output = PulseResult<Coupon>> + Send;
    fn get_by_code(&self, code: &str) -> impl Future<Output = PulseResult<Coupon>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateCoupon,
    ) -> impl Future<Output = PulseResult<Coupon>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = PulseResult<()>> + Send;
    fn list(&self) -> impl Future<Output = PulseResult<Vec<Coupon>>> + Send;
}

// ---------------------------------------------------------------------------
// Reports (append-only)
// ---------------------------------------------------------------------------

pub trait ReportRepository: Send + Sync {
    fn append(&self, input: CreateReport) -> impl Future<Output = PulseResult<Report>> + Send;
    fn list(&self) -> impl Future<Output = PulseResult<Vec<Report>>> + Send;
    fn list_for_product(
        &self,
        product_id: &str,
    ) -> impl Future<Output = PulseResult<Vec<Report>>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = PulseResult<()>> + Send;
}

// ---------------------------------------------------------------------------
// Payments (append-only log)
// ---------------------------------------------------------------------------

pub trait PaymentRepository: Send + Sync {
    fn append(&self, input: CreatePayment) -> impl Future<Output = PulseResult<Payment>> + Send;
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = PulseResult<PaginatedResult<Payment>>> + Send;
    fn list_by_user(&self, email: &str) -> impl Future<Output = PulseResult<Vec<Payment>>> + Send;
}

// ---------------------------------------------------------------------------
// Sliders
// ---------------------------------------------------------------------------

pub trait SliderRepository: Send + Sync {
    fn create(&self, input: CreateSlider) -> impl Future<Output = PulseResult<Slider>> + Send;
    /// Ordered by position ascending.
    fn list(&self) -> impl Future<Output = PulseResult<Vec<Slider>>> + Send;
}

// ---------------------------------------------------------------------------
// Dashboard statistics
// ---------------------------------------------------------------------------

/// Product counts broken down by moderation status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusBreakdown {
    pub accepted: u64,
    pub pending: u64,
    pub rejected: u64,
}

/// Site-wide dashboard counts.
///
/// Each field comes from an independent count query; the snapshot is
/// not atomic across fields under concurrent writes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AdminSnapshot {
    pub users: u64,
    pub products: u64,
    pub reviews: u64,
    pub by_status: StatusBreakdown,
    pub reported_products: u64,
}

/// Per-owner dashboard counts, same consistency caveat.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OwnerSnapshot {
    pub products: u64,
    pub by_status: StatusBreakdown,
    pub reviews_written: u64,
}

pub trait StatsRepository: Send + Sync {
    fn admin_snapshot(&self) -> impl Future<Output = PulseResult<AdminSnapshot>> + Send;
    fn owner_snapshot(&self, email: &str)
    -> impl Future<Output = PulseResult<OwnerSnapshot>> + Send;
}
