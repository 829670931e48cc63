//! Postgres implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use todo_core::domain::entities::user::User;
use todo_core::errors::{AuthError, DomainError};
use todo_core::repositories::UserRepository;

use super::storage_error;

/// Postgres error code for unique-constraint violations.
const UNIQUE_VIOLATION: &str = "23505";
const USERNAME_CONSTRAINT: &str = "users_username_key";
const EMAIL_CONSTRAINT: &str = "users_email_key";

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
        Ok(User {
            id: row.try_get("id").map_err(storage_error)?,
            username: row.try_get("username").map_err(storage_error)?,
            email: row.try_get("email").map_err(storage_error)?,
            password_hash: row.try_get("password_hash").map_err(storage_error)?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(storage_error)?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(storage_error)?,
        })
    }

    /// The service pre-checks duplicates for a friendly error, but under
    /// concurrent registration the unique constraint is the real guard;
    /// translate its violation back into the field-level error.
    fn translate_unique_violation(err: sqlx::Error) -> DomainError {
        let conflict = err.as_database_error().and_then(|db| {
            if db.code().as_deref() != Some(UNIQUE_VIOLATION) {
                return None;
            }
            match db.constraint() {
                Some(USERNAME_CONSTRAINT) => Some(AuthError::UsernameExists),
                Some(EMAIL_CONSTRAINT) => Some(AuthError::EmailExists),
                _ => None,
            }
        });

        match conflict {
            Some(auth_error) => DomainError::Auth(auth_error),
            None => storage_error(err),
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash, created_at, updated_at
        "#;

        let row = sqlx::query(query)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(Self::translate_unique_violation)?;

        Self::row_to_user(&row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, username, email, password_hash, created_at, updated_at
            FROM users
            WHERE id = $1
        "#;

        let row = sqlx::query(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, username, email, password_hash, created_at, updated_at
            FROM users
            WHERE username = $1
        "#;

        let row = sqlx::query(query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, username, email, password_hash, created_at, updated_at
            FROM users
            WHERE email = $1
        "#;

        let row = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users
            SET username = $2, email = $3, password_hash = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING id, username, email, password_hash, created_at, updated_at
        "#;

        let row = sqlx::query(query)
            .bind(user.id)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(Self::translate_unique_violation)?;

        match row {
            Some(row) => Self::row_to_user(&row),
            None => Err(AuthError::UserNotFound.into()),
        }
    }
}
