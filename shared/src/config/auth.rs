//! Authentication configuration

use std::env;

/// Development fallback used when `JWT_SECRET` is unset. The binary logs a
/// warning at startup whenever this value is in effect.
pub const DEFAULT_JWT_SECRET: &str = "your-secret-key-change-in-production";

/// Access token lifetime in minutes.
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 15;

/// Refresh token lifetime in days.
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

/// bcrypt cost factor for password hashing.
pub const BCRYPT_COST: u32 = 10;

/// Settings for token signing and password hashing.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC-SHA256 signing secret (`JWT_SECRET`)
    pub jwt_secret: String,
    /// Whether the insecure development default is in use
    pub using_default_secret: bool,
    /// Access token lifetime in minutes
    pub access_token_expiry_minutes: i64,
    /// Refresh token lifetime in days
    pub refresh_token_expiry_days: i64,
    /// bcrypt cost factor
    pub bcrypt_cost: u32,
    /// Interval for the token GC task in seconds; 0 disables it
    /// (`TOKEN_CLEANUP_INTERVAL_SECS`)
    pub cleanup_interval_secs: u64,
}

impl AuthConfig {
    /// Load the configuration from environment variables.
    pub fn from_env() -> Self {
        let (jwt_secret, using_default_secret) = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => (secret, false),
            _ => (DEFAULT_JWT_SECRET.to_string(), true),
        };

        let cleanup_interval_secs = env::var("TOKEN_CLEANUP_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3600);

        Self {
            jwt_secret,
            using_default_secret,
            access_token_expiry_minutes: ACCESS_TOKEN_EXPIRY_MINUTES,
            refresh_token_expiry_days: REFRESH_TOKEN_EXPIRY_DAYS,
            bcrypt_cost: BCRYPT_COST,
            cleanup_interval_secs,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            using_default_secret: true,
            access_token_expiry_minutes: ACCESS_TOKEN_EXPIRY_MINUTES,
            refresh_token_expiry_days: REFRESH_TOKEN_EXPIRY_DAYS,
            bcrypt_cost: BCRYPT_COST,
            cleanup_interval_secs: 3600,
        }
    }
}
