//! Mock implementation of TokenBlacklistRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::DomainError;

use super::r#trait::TokenBlacklistRepository;

/// In-memory blacklist keyed by token id.
#[derive(Default)]
pub struct MockTokenBlacklistRepository {
    entries: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
}

impl MockTokenBlacklistRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently held, expired ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl TokenBlacklistRepository for MockTokenBlacklistRepository {
    async fn add(&self, token_id: &str, expires_at: DateTime<Utc>) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        // first write wins, matching ON CONFLICT DO NOTHING
        entries.entry(token_id.to_string()).or_insert(expires_at);
        Ok(())
    }

    async fn contains(&self, token_id: &str) -> Result<bool, DomainError> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(token_id)
            .map(|expires_at| *expires_at > Utc::now())
            .unwrap_or(false))
    }

    async fn cleanup_expired(&self) -> Result<u64, DomainError> {
        let mut entries = self.entries.write().await;
        let now = Utc::now();
        let before = entries.len();
        entries.retain(|_, expires_at| *expires_at > now);
        Ok((before - entries.len()) as u64)
    }
}
