//! Authentication service: registration, login, token validation,
//! logout, refresh rotation and profile updates.

pub mod service;

pub use service::{AuthService, LoginTokens};

#[cfg(test)]
mod tests;
