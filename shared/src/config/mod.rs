//! Application configuration loaded from environment variables.
//!
//! Every config struct has a `from_env()` constructor with the same
//! defaults the service has always shipped with, so a bare `docker run`
//! against a local Postgres works without any configuration.

pub mod auth;
pub mod database;
pub mod server;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use server::{Environment, ServerConfig};
