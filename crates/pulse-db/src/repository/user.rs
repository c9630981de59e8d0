//! SurrealDB implementation of [`UserRepository`].
//!
//! Users are created on first sign-in. Role and subscription changes
//! are keyed by email, which carries a unique index.

use chrono::{DateTime, Utc};
use pulse_core::error::PulseResult;
use pulse_core::models::user::{SignInUser, SubscriptionStatus, User, UserRole};
use pulse_core::repository::{PaginatedResult, Pagination, UserRepository};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct UserRow {
    email: String,
    name: String,
    photo: String,
    role: String,
    subscription: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct UserRowWithId {
    record_id: String,
    email: String,
    name: String,
    photo: String,
    role: String,
    subscription: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_role(s: &str) -> PulseResult<UserRole> {
    match s {
        "User" => Ok(UserRole::User),
        "Moderator" => Ok(UserRole::Moderator),
        "Admin" => Ok(UserRole::Admin),
        other => Err(error::corrupt(format!("unknown user role: {other}"))),
    }
}

fn role_to_string(r: &UserRole) -> &'static str {
    match r {
        UserRole::User => "User",
        UserRole::Moderator => "Moderator",
        UserRole::Admin => "Admin",
    }
}

fn parse_subscription(s: &str) -> PulseResult<SubscriptionStatus> {
    match s {
        "Free" => Ok(SubscriptionStatus::Free),
        "Verified" => Ok(SubscriptionStatus::Verified),
        other => Err(error::corrupt(format!(
            "unknown subscription status: {other}"
        ))),
    }
}

fn subscription_to_string(s: &SubscriptionStatus) -> &'static str {
    match s {
        SubscriptionStatus::Free => "Free",
        SubscriptionStatus::Verified => "Verified",
    }
}

impl UserRow {
    fn into_user(self, id: Uuid) -> PulseResult<User> {
        Ok(User {
            id,
            email: self.email,
            name: self.name,
            photo: self.photo,
            role: parse_role(&self.role)?,
            subscription: parse_subscription(&self.subscription)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl UserRowWithId {
    fn try_into_user(self) -> PulseResult<User> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| error::corrupt(format!("invalid record id: {e}")))?;
        Ok(User {
            id,
            email: self.email,
            name: self.name,
            photo: self.photo,
            role: parse_role(&self.role)?,
            subscription: parse_subscription(&self.subscription)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// SurrealDB implementation of the User repository.
#[derive(Clone)]
pub struct SurrealUserRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealUserRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> UserRepository for SurrealUserRepository<C> {
    async fn upsert_on_sign_in(&self, input: SignInUser) -> PulseResult<User> {
        // First sign-in wins: if the email is already registered,
        // return the stored user untouched.
        match self.get_by_email(&input.email).await {
            Ok(existing) => return Ok(existing),
            Err(pulse_core::PulseError::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }

        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('user', $id) SET \
                 email = $email, \
                 name = $name, \
                 photo = $photo, \
                 role = $role, \
                 subscription = $subscription",
            )
            .bind(("id", id_str.clone()))
            .bind(("email", input.email))
            .bind(("name", input.name))
            .bind(("photo", input.photo))
            .bind(("role", "User".to_string()))
            .bind(("subscription", "Free".to_string()))
            .await
            .map_err(error::storage)?;

        let mut result = result
            .check()
            .map_err(error::storage)?;

        let rows: Vec<UserRow> = result.take(0).map_err(error::storage)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| error::not_found("user", id_str))?;

        row.into_user(id)
    }

    async fn get_by_email(&self, email: &str) -> PulseResult<User> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM user \
                 WHERE email = $email",
            )
            .bind(("email", email.to_string()))
            .await
            .map_err(error::storage)?;

        let rows: Vec<UserRowWithId> = result.take(0).map_err(error::storage)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| error::not_found("user", format!("email={email}")))?;

        row.try_into_user()
    }

    async fn list(&self, pagination: Pagination) -> PulseResult<PaginatedResult<User>> {
        let mut count_result = self
            .db
            .query("SELECT count() AS total FROM user GROUP ALL")
            .await
            .map_err(error::storage)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(error::storage)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM user \
                 ORDER BY created_at ASC \
                 LIMIT $limit START $offset",
            )
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(error::storage)?;

        let rows: Vec<UserRowWithId> = result.take(0).map_err(error::storage)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_user())
            .collect::<PulseResult<Vec<_>>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }

    async fn set_role(&self, email: &str, role: UserRole) -> PulseResult<User> {
        self.db
            .query(
                "UPDATE user SET role = $role, updated_at = time::now() \
                 WHERE email = $email",
            )
            .bind(("email", email.to_string()))
            .bind(("role", role_to_string(&role).to_string()))
            .await
            .map_err(error::storage)?
            .check()
            .map_err(error::storage)?;

        self.get_by_email(email).await
    }

    async fn set_subscription(
        &self,
        email: &str,
        subscription: SubscriptionStatus,
    ) -> PulseResult<User> {
        self.db
            .query(
                "UPDATE user SET subscription = $subscription, \
                 updated_at = time::now() \
                 WHERE email = $email",
            )
            .bind(("email", email.to_string()))
            .bind((
                "subscription",
                subscription_to_string(&subscription).to_string(),
            ))
            .await
            .map_err(error::storage)?
            .check()
            .map_err(error::storage)?;

        self.get_by_email(email).await
    }
}
