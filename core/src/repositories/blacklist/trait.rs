//! Access-token blacklist store interface.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::DomainError;

/// Set of revoked access-token ids, keyed by `jti`.
///
/// An entry only matters until its token's natural expiry: `contains`
/// ignores entries whose `expires_at` has passed, and `cleanup_expired`
/// may delete them at any time without changing observable behaviour.
#[async_trait]
pub trait TokenBlacklistRepository: Send + Sync {
    /// Insert a revocation. Idempotent: adding an already-blacklisted
    /// token id is a no-op, not an error.
    async fn add(&self, token_id: &str, expires_at: DateTime<Utc>) -> Result<(), DomainError>;

    /// True iff an entry for `token_id` exists with `expires_at > now`.
    async fn contains(&self, token_id: &str) -> Result<bool, DomainError>;

    /// Delete entries with `expires_at <= now`; returns the count removed.
    async fn cleanup_expired(&self) -> Result<u64, DomainError>;
}
