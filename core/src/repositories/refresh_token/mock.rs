//! Mock implementation of RefreshTokenRepository for testing

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::token::RefreshTokenRecord;
use crate::errors::DomainError;

use super::r#trait::RefreshTokenRepository;

/// In-memory refresh-token store.
#[derive(Default)]
pub struct MockRefreshTokenRepository {
    records: Arc<RwLock<HashMap<String, RefreshTokenRecord>>>,
}

impl MockRefreshTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl RefreshTokenRepository for MockRefreshTokenRepository {
    async fn store(&self, record: RefreshTokenRecord) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        records.insert(record.token_id.clone(), record);
        Ok(())
    }

    async fn find(&self, token_id: &str) -> Result<Option<RefreshTokenRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(token_id).cloned())
    }

    async fn revoke(&self, token_id: &str) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;
        match records.get_mut(token_id) {
            Some(record) if !record.is_revoked => {
                record.is_revoked = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn revoke_all_for_user(&self, user_id: i64) -> Result<u64, DomainError> {
        let mut records = self.records.write().await;
        let mut revoked = 0;
        for record in records.values_mut() {
            if record.user_id == user_id && !record.is_revoked {
                record.is_revoked = true;
                revoked += 1;
            }
        }
        Ok(revoked)
    }

    async fn cleanup_expired(&self) -> Result<u64, DomainError> {
        let mut records = self.records.write().await;
        let now = Utc::now();
        let before = records.len();
        records.retain(|_, record| !record.is_revoked && record.expires_at > now);
        Ok((before - records.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(token_id: &str, user_id: i64) -> RefreshTokenRecord {
        RefreshTokenRecord::new(token_id.to_string(), user_id, Duration::days(7))
    }

    #[tokio::test]
    async fn missing_token_is_none_not_an_error() {
        let repo = MockRefreshTokenRepository::new();
        assert!(repo.find("absent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn revoke_transitions_exactly_once() {
        let repo = MockRefreshTokenRepository::new();
        repo.store(record("t1", 1)).await.unwrap();

        assert!(repo.revoke("t1").await.unwrap());
        assert!(!repo.revoke("t1").await.unwrap());
        assert!(!repo.revoke("missing").await.unwrap());
    }

    #[tokio::test]
    async fn revoke_all_skips_already_revoked() {
        let repo = MockRefreshTokenRepository::new();
        repo.store(record("t1", 1)).await.unwrap();
        repo.store(record("t2", 1)).await.unwrap();
        repo.store(record("t3", 2)).await.unwrap();
        repo.revoke("t1").await.unwrap();

        assert_eq!(repo.revoke_all_for_user(1).await.unwrap(), 1);
        assert!(repo.find("t3").await.unwrap().unwrap().is_usable());
    }

    #[tokio::test]
    async fn cleanup_drops_expired_and_revoked_rows() {
        let repo = MockRefreshTokenRepository::new();
        repo.store(record("live", 1)).await.unwrap();
        repo.store(RefreshTokenRecord::new(
            "expired".to_string(),
            1,
            Duration::seconds(0),
        ))
        .await
        .unwrap();
        repo.store(record("revoked", 1)).await.unwrap();
        repo.revoke("revoked").await.unwrap();

        assert_eq!(repo.cleanup_expired().await.unwrap(), 2);
        assert_eq!(repo.len().await, 1);
    }
}
