//! Request field validation.
//!
//! The rules here are the single source of truth for what the service
//! accepts in usernames, email addresses and passwords. Messages are the
//! user-facing Japanese strings the frontend displays verbatim, keyed by
//! field name.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static USERNAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("username pattern"));

// Single '@' with at least one '.' in the domain part, and at least one
// character after the final dot.
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@]+@[^@]*\.[^@]+$").expect("email pattern"));

/// Collection of per-field validation errors.
#[derive(Debug, Default)]
pub struct ValidationErrors {
    errors: HashMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_field_errors(self) -> HashMap<String, String> {
        self.errors
    }
}

/// Validate a username: required, 3-20 code points, `[A-Za-z0-9_]` only.
pub fn validate_username(username: &str) -> Option<String> {
    if username.is_empty() {
        return Some("ユーザー名は必須です".to_string());
    }
    let length = username.chars().count();
    if !(3..=20).contains(&length) {
        return Some("ユーザー名は3-20文字で入力してください".to_string());
    }
    if !USERNAME_PATTERN.is_match(username) {
        return Some("ユーザー名は英数字とアンダースコアのみ使用できます".to_string());
    }
    None
}

/// Validate an email address: required, single `@`, dot in the domain.
pub fn validate_email(email: &str) -> Option<String> {
    if email.is_empty() {
        return Some("メールアドレスは必須です".to_string());
    }
    if !EMAIL_PATTERN.is_match(email) {
        return Some("有効なメールアドレスを入力してください".to_string());
    }
    None
}

/// Validate a password: required, at least 8 chars, letters and digits.
pub fn validate_password(password: &str) -> Option<String> {
    if password.is_empty() {
        return Some("パスワードは必須です".to_string());
    }
    if password.chars().count() < 8 {
        return Some("パスワードは8文字以上で入力してください".to_string());
    }
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !has_letter || !has_digit {
        return Some("パスワードは英数字の両方を含む必要があります".to_string());
    }
    None
}
