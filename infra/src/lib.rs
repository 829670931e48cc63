//! # Todo Infra
//!
//! Infrastructure layer: Postgres-backed implementations of the core
//! repository traits plus connection-pool bootstrap. SQL lives here and
//! nowhere else.

pub mod database;

pub use database::connection::create_pool;
pub use database::postgres::{
    PgRefreshTokenRepository, PgTodoRepository, PgTokenBlacklistRepository, PgUserRepository,
};
