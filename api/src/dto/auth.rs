//! Authentication and profile DTOs.
//!
//! Field validation follows the rules in `todo_shared::utils::validation`;
//! each request type produces a complete per-field error map in one pass
//! so the client can annotate every offending input at once.

use serde::{Deserialize, Serialize};

use todo_core::domain::entities::user::User;
use todo_core::errors::DomainError;
use todo_shared::utils::validation::{
    validate_email, validate_password, validate_username, ValidationErrors,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut errors = ValidationErrors::new();
        if let Some(message) = validate_username(&self.username) {
            errors.add("username", message);
        }
        if let Some(message) = validate_email(&self.email) {
            errors.add("email", message);
        }
        if let Some(message) = validate_password(&self.password) {
            errors.add("password", message);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation {
                fields: errors.into_field_errors(),
            })
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut errors = ValidationErrors::new();
        if self.username.is_empty() {
            errors.add("username", "ユーザー名は必須です");
        }
        if self.password.is_empty() {
            errors.add("password", "パスワードは必須です");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation {
                fields: errors.into_field_errors(),
            })
        }
    }
}

/// Public view of a user; never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    /// Opaque handle for POST /api/v1/refresh; the access token itself
    /// travels in the auth_token cookie.
    pub refresh_token: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
}

impl UpdateProfileRequest {
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut errors = ValidationErrors::new();
        if let Some(message) = validate_username(&self.username) {
            errors.add("username", message);
        }
        if let Some(message) = validate_email(&self.email) {
            errors.add("email", message);
        }
        if !self.new_password.is_empty() {
            if self.current_password.is_empty() {
                errors.add("current_password", "現在のパスワードを入力してください");
            }
            if let Some(message) = validate_password(&self.new_password) {
                errors.add("new_password", message);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation {
                fields: errors.into_field_errors(),
            })
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileResponse {
    pub user: UserResponse,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_collects_every_field_error() {
        let request = RegisterRequest {
            username: "x".to_string(),
            email: "bad".to_string(),
            password: "short".to_string(),
        };

        match request.validate().unwrap_err() {
            DomainError::Validation { fields } => {
                assert!(fields.contains_key("username"));
                assert!(fields.contains_key("email"));
                assert!(fields.contains_key("password"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn profile_password_rules_only_apply_when_changing() {
        let request = UpdateProfileRequest {
            username: "alice".to_string(),
            email: "a@example.com".to_string(),
            current_password: String::new(),
            new_password: String::new(),
        };
        assert!(request.validate().is_ok());

        let request = UpdateProfileRequest {
            new_password: "NewSecret1".to_string(),
            ..request
        };
        match request.validate().unwrap_err() {
            DomainError::Validation { fields } => {
                assert!(fields.contains_key("current_password"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
