//! User domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum UserRole {
    User,
    Moderator,
    Admin,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SubscriptionStatus {
    Free,
    Verified,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    /// Avatar URL from the sign-in provider.
    pub photo: String,
    pub role: UserRole,
    pub subscription: SubscriptionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Identity received on sign-in. Users are created on first sign-in
/// with role User and a Free subscription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInUser {
    pub email: String,
    pub name: String,
    pub photo: String,
}
