//! Domain-specific error types for authentication and todo operations.
//!
//! Each variant maps to one stable error code at the HTTP boundary; the
//! user-facing messages live in the presentation layer, not here.

use std::collections::HashMap;
use thiserror::Error;

/// Credential and account errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Uniform for unknown username and wrong password alike
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("username already exists")]
    UsernameExists,

    #[error("email already exists")]
    EmailExists,

    #[error("user not found")]
    UserNotFound,

    #[error("current password is incorrect")]
    CurrentPasswordIncorrect,

    #[error("failed to hash password")]
    PasswordHashFailed,
}

/// Token validation and lifecycle errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Structurally not a JWT, or undecodable payload
    #[error("token malformed")]
    Malformed,

    /// Signature check failed, or the declared algorithm is not HS256
    #[error("token signature invalid")]
    InvalidSignature,

    #[error("token expired")]
    Expired,

    /// The jti is on the blacklist and the entry has not expired
    #[error("token revoked")]
    Revoked,

    /// Well-formed JWT whose claims don't satisfy our shape
    #[error("token claims invalid")]
    InvalidClaims,

    /// Refresh token row missing, revoked, or expired
    #[error("refresh token invalid")]
    RefreshInvalid,

    /// Entropy failure, signing failure, or a refresh token that could
    /// not be persisted
    #[error("token issuance failed")]
    IssuanceFailed,
}

/// Top-level error surfaced by the core services.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    /// Request body failed field validation; `fields` maps field name to
    /// a user-facing message
    #[error("validation failed")]
    Validation { fields: HashMap<String, String> },

    #[error("todo not found")]
    TodoNotFound,

    /// Persistence failure. The message is for server-side logs only and
    /// must never reach a client.
    #[error("storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    /// Wrap a low-level store failure.
    pub fn storage(err: impl std::fmt::Display) -> Self {
        DomainError::Storage {
            message: err.to_string(),
        }
    }

    /// Single-field validation error.
    pub fn validation_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut fields = HashMap::new();
        fields.insert(field.into(), message.into());
        DomainError::Validation { fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transparent_display_for_nested_errors() {
        let err: DomainError = AuthError::InvalidCredentials.into();
        assert_eq!(err.to_string(), "invalid credentials");

        let err: DomainError = TokenError::Revoked.into();
        assert_eq!(err.to_string(), "token revoked");
    }

    #[test]
    fn storage_wrapping_keeps_cause_for_logs() {
        let err = DomainError::storage("connection refused");
        assert_eq!(err.to_string(), "storage error: connection refused");
    }
}
