//! Postgres implementation of the RefreshTokenRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use todo_core::domain::entities::token::RefreshTokenRecord;
use todo_core::errors::DomainError;
use todo_core::repositories::RefreshTokenRepository;

use super::storage_error;

pub struct PgRefreshTokenRepository {
    pool: PgPool,
}

impl PgRefreshTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_record(row: &PgRow) -> Result<RefreshTokenRecord, DomainError> {
        Ok(RefreshTokenRecord {
            token_id: row.try_get("token_id").map_err(storage_error)?,
            user_id: row.try_get("user_id").map_err(storage_error)?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(storage_error)?,
            is_revoked: row.try_get("is_revoked").map_err(storage_error)?,
        })
    }
}

#[async_trait]
impl RefreshTokenRepository for PgRefreshTokenRepository {
    async fn store(&self, record: RefreshTokenRecord) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO refresh_tokens (token_id, user_id, expires_at, is_revoked)
            VALUES ($1, $2, $3, $4)
        "#;

        sqlx::query(query)
            .bind(&record.token_id)
            .bind(record.user_id)
            .bind(record.expires_at)
            .bind(record.is_revoked)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(())
    }

    async fn find(&self, token_id: &str) -> Result<Option<RefreshTokenRecord>, DomainError> {
        let query = r#"
            SELECT token_id, user_id, expires_at, is_revoked
            FROM refresh_tokens
            WHERE token_id = $1
        "#;

        let row = sqlx::query(query)
            .bind(token_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn revoke(&self, token_id: &str) -> Result<bool, DomainError> {
        // Conditional update: the affected-row count decides the winner of
        // a concurrent rotation on the same token.
        let query = r#"
            UPDATE refresh_tokens
            SET is_revoked = TRUE
            WHERE token_id = $1 AND is_revoked = FALSE
        "#;

        let result = sqlx::query(query)
            .bind(token_id)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn revoke_all_for_user(&self, user_id: i64) -> Result<u64, DomainError> {
        let query = r#"
            UPDATE refresh_tokens
            SET is_revoked = TRUE
            WHERE user_id = $1 AND is_revoked = FALSE
        "#;

        let result = sqlx::query(query)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(result.rows_affected())
    }

    async fn cleanup_expired(&self) -> Result<u64, DomainError> {
        let query = r#"
            DELETE FROM refresh_tokens
            WHERE expires_at <= NOW() OR is_revoked = TRUE
        "#;

        let result = sqlx::query(query)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(result.rows_affected())
    }
}
