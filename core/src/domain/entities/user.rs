//! User entity

use chrono::{DateTime, Utc};

/// A registered account.
///
/// `password_hash` is the opaque bcrypt output (salt and cost included);
/// the plaintext password never reaches this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Database-assigned identifier, immutable after creation
    pub id: i64,
    /// Unique login name, 3-20 chars of `[A-Za-z0-9_]`
    pub username: String,
    /// Unique email address
    pub email: String,
    /// bcrypt hash of the password
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a not-yet-persisted user. The id is assigned by the store on
    /// insert; the timestamps are placeholders the store overwrites with
    /// database values.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_has_no_id() {
        let user = User::new("alice", "a@example.com", "$2b$10$hash");
        assert_eq!(user.id, 0);
        assert_eq!(user.username, "alice");
        assert_eq!(user.created_at, user.updated_at);
    }
}
