//! # Todo Core
//!
//! Core business logic and domain layer for the todo backend. This crate
//! contains domain entities, the authentication and todo services,
//! repository interfaces, and error types. It knows nothing about HTTP or
//! SQL; those live in the api and infra crates.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

pub use errors::{AuthError, DomainError, TokenError};
