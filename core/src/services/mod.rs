//! Business services

pub mod auth;
pub mod todo;
pub mod token;

pub use auth::AuthService;
pub use todo::TodoService;
pub use token::{TokenCleanupService, TokenCodec, TokenConfig};
