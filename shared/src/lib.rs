//! # Todo Shared
//!
//! Cross-cutting configuration and utilities shared by the api, core and
//! infra crates.

pub mod config;
pub mod utils;

pub use config::{AuthConfig, DatabaseConfig, Environment, ServerConfig};
