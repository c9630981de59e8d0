//! Product domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Moderation status of a product listing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProductStatus {
    Pending,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Image URL for the listing card.
    pub image: String,
    /// External link to the product's own site.
    pub external_link: String,
    pub tags: Vec<String>,
    pub owner_name: String,
    pub owner_email: String,
    pub status: ProductStatus,
    pub featured: bool,
    pub reported: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProduct {
    pub name: String,
    pub description: String,
    pub image: String,
    pub external_link: String,
    pub tags: Vec<String>,
    pub owner_name: String,
    pub owner_email: String,
}

/// Owner-editable listing details.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub external_link: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Moderator-only flags. Owners cannot touch these.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ModerateProduct {
    pub status: Option<ProductStatus>,
    pub featured: Option<bool>,
    pub reported: Option<bool>,
}
