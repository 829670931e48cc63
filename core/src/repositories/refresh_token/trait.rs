//! Refresh-token store interface.

use async_trait::async_trait;

use crate::domain::entities::token::RefreshTokenRecord;
use crate::errors::DomainError;

/// Store for refresh-token records, keyed by the opaque token id.
///
/// `revoke` is the rotation guard: it must flip `is_revoked` only when the
/// row is currently unrevoked and report whether it did, so that two
/// concurrent rotations of the same token produce exactly one winner.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// Insert a fresh unrevoked record.
    async fn store(&self, record: RefreshTokenRecord) -> Result<(), DomainError>;

    /// Fetch a record by token id. A missing row is `Ok(None)`, never an
    /// error; the caller derives usability from the record itself.
    async fn find(&self, token_id: &str) -> Result<Option<RefreshTokenRecord>, DomainError>;

    /// Conditionally set `is_revoked = true`. Returns `true` iff this
    /// call performed the transition; a second revoke of the same token
    /// returns `false`.
    async fn revoke(&self, token_id: &str) -> Result<bool, DomainError>;

    /// Revoke every currently-unrevoked token of a user; returns the
    /// count revoked.
    async fn revoke_all_for_user(&self, user_id: i64) -> Result<u64, DomainError>;

    /// Delete rows that are expired or revoked; returns the count removed.
    async fn cleanup_expired(&self) -> Result<u64, DomainError>;
}
