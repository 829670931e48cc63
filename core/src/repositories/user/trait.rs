//! User repository trait defining the interface for account persistence.

use async_trait::async_trait;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Store interface for `User` records.
///
/// `create` and `update` must treat the database uniqueness constraints on
/// username and email as authoritative: a constraint-violation insert is
/// surfaced as `AuthError::UsernameExists` / `AuthError::EmailExists`, not
/// as a generic storage error. The find methods never error on absence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return it with the database-assigned id and
    /// timestamps.
    async fn create(&self, user: User) -> Result<User, DomainError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Persist username/email/password_hash changes; `updated_at` is
    /// refreshed by the store.
    async fn update(&self, user: User) -> Result<User, DomainError>;
}
