//! Periodic garbage collection of expired tokens and blacklist entries.
//!
//! Entries past their expiry carry no information: an expired blacklist
//! row can never flip a validation result, and an expired or revoked
//! refresh row can never be used. Deleting them keeps the tables bounded.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use crate::errors::DomainError;
use crate::repositories::{RefreshTokenRepository, TokenBlacklistRepository};

/// Summary of one cleanup cycle.
#[derive(Debug, Default)]
pub struct CleanupResult {
    pub refresh_tokens_deleted: u64,
    pub blacklist_entries_deleted: u64,
    pub errors: Vec<String>,
}

/// Service that sweeps both token stores on an interval.
pub struct TokenCleanupService<B, R> {
    blacklist: Arc<B>,
    refresh_tokens: Arc<R>,
    interval: Duration,
}

impl<B, R> TokenCleanupService<B, R>
where
    B: TokenBlacklistRepository + 'static,
    R: RefreshTokenRepository + 'static,
{
    pub fn new(blacklist: Arc<B>, refresh_tokens: Arc<R>, interval: Duration) -> Self {
        Self {
            blacklist,
            refresh_tokens,
            interval,
        }
    }

    /// Run a single cleanup cycle. Failures in one store do not stop the
    /// sweep of the other; they are collected in the result.
    pub async fn run_cleanup(&self) -> Result<CleanupResult, DomainError> {
        let mut result = CleanupResult::default();

        match self.refresh_tokens.cleanup_expired().await {
            Ok(count) => {
                result.refresh_tokens_deleted = count;
            }
            Err(e) => {
                error!("Failed to cleanup refresh tokens: {}", e);
                result.errors.push(format!("refresh token cleanup: {}", e));
            }
        }

        match self.blacklist.cleanup_expired().await {
            Ok(count) => {
                result.blacklist_entries_deleted = count;
            }
            Err(e) => {
                error!("Failed to cleanup blacklist: {}", e);
                result.errors.push(format!("blacklist cleanup: {}", e));
            }
        }

        info!(
            "Token cleanup completed - refresh tokens: {}, blacklist entries: {}",
            result.refresh_tokens_deleted, result.blacklist_entries_deleted
        );

        Ok(result)
    }

    /// Loop forever, sweeping once per interval. Spawned as a background
    /// task by the binary; errors are logged and the loop continues.
    pub async fn run_forever(self) {
        let mut ticker = tokio::time::interval(self.interval);
        // the first tick fires immediately; skip straight to the cadence
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if let Err(e) = self.run_cleanup().await {
                error!("Token cleanup cycle failed: {}", e);
            }
        }
    }
}
