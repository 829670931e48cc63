//! # Todo API
//!
//! HTTP surface of the todo backend: actix-web application factory,
//! authentication middleware, DTOs and route handlers. Exposed as a
//! library so integration tests can build the full app against mock
//! stores.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
