//! Postgres implementation of the TokenBlacklistRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use todo_core::errors::DomainError;
use todo_core::repositories::TokenBlacklistRepository;

use super::storage_error;

pub struct PgTokenBlacklistRepository {
    pool: PgPool,
}

impl PgTokenBlacklistRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenBlacklistRepository for PgTokenBlacklistRepository {
    async fn add(&self, token_id: &str, expires_at: DateTime<Utc>) -> Result<(), DomainError> {
        // token_id is the primary key; a duplicate insert is swallowed
        // here so logout stays idempotent.
        let query = r#"
            INSERT INTO token_blacklist (token_id, expires_at)
            VALUES ($1, $2)
            ON CONFLICT (token_id) DO NOTHING
        "#;

        sqlx::query(query)
            .bind(token_id)
            .bind(expires_at)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(())
    }

    async fn contains(&self, token_id: &str) -> Result<bool, DomainError> {
        let query = r#"
            SELECT EXISTS(
                SELECT 1 FROM token_blacklist
                WHERE token_id = $1 AND expires_at > NOW()
            ) AS revoked
        "#;

        let row = sqlx::query(query)
            .bind(token_id)
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error)?;

        row.try_get("revoked").map_err(storage_error)
    }

    async fn cleanup_expired(&self) -> Result<u64, DomainError> {
        let query = "DELETE FROM token_blacklist WHERE expires_at <= NOW()";

        let result = sqlx::query(query)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(result.rows_affected())
    }
}
