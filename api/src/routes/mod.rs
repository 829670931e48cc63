//! Route handlers
//!
//! Handlers are generic over the four store traits, mirroring the service
//! layer; the concrete types are fixed once at composition time in `main`
//! (Postgres) or in the integration tests (mocks).

pub mod auth;
pub mod todos;
pub mod users;

use std::sync::Arc;

use todo_core::repositories::{
    RefreshTokenRepository, TodoRepository, TokenBlacklistRepository, UserRepository,
};
use todo_core::services::auth::AuthService;
use todo_core::services::todo::TodoService;

/// Shared application state handed to every handler.
pub struct AppState<U, B, R, T>
where
    U: UserRepository,
    B: TokenBlacklistRepository,
    R: RefreshTokenRepository,
    T: TodoRepository,
{
    pub auth_service: Arc<AuthService<U, B, R>>,
    pub todo_service: Arc<TodoService<T>>,
    /// Set the `Secure` attribute on the auth cookie (production only)
    pub cookie_secure: bool,
}
