//! JWT access-token codec.
//!
//! Issues and verifies the short-lived HS256 bearer tokens. The codec is
//! a pure signature/shape check: revocation (blacklist) is the auth
//! service's concern, so `decode` has no side effects at all.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::{Claims, TOKEN_TYPE_ACCESS};
use crate::errors::{DomainError, TokenError};

use super::config::TokenConfig;
use super::id::generate_token_id;

/// Codec for access tokens, keys precomputed from the injected secret.
pub struct TokenCodec {
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    /// Same as `validation` but tolerating `exp <= now`; used by logout to
    /// blacklist tokens that have already expired.
    expiry_tolerant: Validation,
}

impl TokenCodec {
    pub fn new(config: TokenConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        // Only HS256 is ever accepted; `exp <= now` is expired, no leeway.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;

        let mut expiry_tolerant = Validation::new(Algorithm::HS256);
        expiry_tolerant.leeway = 0;
        expiry_tolerant.validate_exp = false;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
            expiry_tolerant,
        }
    }

    /// Access-token lifetime in seconds, for `expires_in` fields and the
    /// cookie max-age.
    pub fn access_token_lifetime_secs(&self) -> i64 {
        self.config.access_token_expiry_minutes * 60
    }

    /// Refresh-token lifetime.
    pub fn refresh_token_lifetime(&self) -> chrono::Duration {
        chrono::Duration::days(self.config.refresh_token_expiry_days)
    }

    /// Issue a signed access token with a fresh `jti`.
    pub fn issue_access_token(&self, user_id: i64, username: &str) -> Result<String, DomainError> {
        let jti = generate_token_id()?;
        let claims = Claims::new_access_token(
            user_id,
            username,
            jti,
            self.config.access_token_expiry_minutes,
        );
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::IssuanceFailed))
    }

    /// Verify signature, algorithm, expiry and claim shape.
    pub fn decode(&self, token: &str) -> Result<Claims, DomainError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(map_decode_error)?;
        Self::check_token_type(data.claims)
    }

    /// Like [`Self::decode`] but an expired token still yields its claims.
    /// Signature and shape defects are rejected exactly as in `decode`.
    pub fn decode_allow_expired(&self, token: &str) -> Result<Claims, DomainError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.expiry_tolerant)
            .map_err(map_decode_error)?;
        Self::check_token_type(data.claims)
    }

    fn check_token_type(claims: Claims) -> Result<Claims, DomainError> {
        if claims.token_type != TOKEN_TYPE_ACCESS {
            return Err(DomainError::Token(TokenError::InvalidClaims));
        }
        Ok(claims)
    }
}

fn map_decode_error(err: jsonwebtoken::errors::Error) -> DomainError {
    use jsonwebtoken::errors::ErrorKind;

    let token_error = match err.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        // Declared algorithm is not the one we validate with
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            TokenError::InvalidSignature
        }
        ErrorKind::MissingRequiredClaim(_) => TokenError::InvalidClaims,
        // Payload decoded but does not match the fixed claim shape
        ErrorKind::Json(_) => TokenError::InvalidClaims,
        _ => TokenError::Malformed,
    };
    DomainError::Token(token_error)
}
