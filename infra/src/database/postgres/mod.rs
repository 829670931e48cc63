//! Postgres implementations of the core store traits.

pub mod refresh_token_repository_impl;
pub mod todo_repository_impl;
pub mod token_blacklist_repository_impl;
pub mod user_repository_impl;

pub use refresh_token_repository_impl::PgRefreshTokenRepository;
pub use todo_repository_impl::PgTodoRepository;
pub use token_blacklist_repository_impl::PgTokenBlacklistRepository;
pub use user_repository_impl::PgUserRepository;

use todo_core::errors::DomainError;
use tracing::error;

/// Wrap a driver error for the core layer. The driver message is logged
/// server-side and carried only in `DomainError::Storage`, which the HTTP
/// layer never forwards to a client.
pub(crate) fn storage_error(err: sqlx::Error) -> DomainError {
    error!("database error: {}", err);
    DomainError::storage(err)
}
