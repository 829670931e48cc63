//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// The only token type carried in signed claims.
pub const TOKEN_TYPE_ACCESS: &str = "access";

/// Claims structure for the JWT payload.
///
/// The shape is fixed: unknown fields make the token undecodable, so a
/// payload produced by anything other than our codec is rejected at parse
/// time rather than silently accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Claims {
    /// JWT ID, unique per issuance; blacklist key for revocation
    pub jti: String,

    /// Owning user's database id
    pub user_id: i64,

    /// Username at issuance time
    pub username: String,

    /// Token type discriminator, always `"access"`
    #[serde(rename = "type")]
    pub token_type: String,

    /// Issued-at, seconds since epoch
    pub iat: i64,

    /// Expiry, seconds since epoch (`exp = iat + lifetime`)
    pub exp: i64,
}

impl Claims {
    /// Creates claims for a fresh access token.
    pub fn new_access_token(
        user_id: i64,
        username: impl Into<String>,
        jti: String,
        lifetime_minutes: i64,
    ) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::minutes(lifetime_minutes);

        Self {
            jti,
            user_id,
            username: username.into(),
            token_type: TOKEN_TYPE_ACCESS.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        }
    }

    /// `exp <= now` means expired; there is no leeway anywhere in the
    /// validation path.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// The expiry as a timestamp, if it is representable.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }
}

/// Refresh token record as stored in the database.
///
/// The token id doubles as the opaque handle handed to the client; it is
/// usable iff `is_revoked = false` and `now < expires_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenRecord {
    /// Opaque random identifier (32 hex chars), primary key
    pub token_id: String,

    /// User this token belongs to
    pub user_id: i64,

    /// Hard expiry; rotation never extends it past issuance + lifetime
    pub expires_at: DateTime<Utc>,

    /// Monotone flag: set by rotation, logout-all or revoke, never cleared
    pub is_revoked: bool,
}

impl RefreshTokenRecord {
    /// Creates an unrevoked record expiring `lifetime` from now.
    pub fn new(token_id: String, user_id: i64, lifetime: Duration) -> Self {
        Self {
            token_id,
            user_id,
            expires_at: Utc::now() + lifetime,
            is_revoked: false,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Usable for refresh: not revoked and not expired.
    pub fn is_usable(&self) -> bool {
        !self.is_revoked && !self.is_expired()
    }
}
