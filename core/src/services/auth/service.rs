//! Main authentication service implementation

use std::sync::Arc;

use tracing::{error, warn};

use crate::domain::entities::token::{Claims, RefreshTokenRecord};
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::{RefreshTokenRepository, TokenBlacklistRepository, UserRepository};
use crate::services::token::{generate_token_id, TokenCodec};

/// A freshly issued access/refresh pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginTokens {
    pub access_token: String,
    pub refresh_token: String,
    /// Access-token lifetime in seconds
    pub expires_in: i64,
}

/// Orchestrates credential handling and the token lifecycle over the
/// three stores. Holds no mutable state of its own; everything shared
/// lives in the database, so instances are freely cloneable across
/// request handlers via `Arc`.
pub struct AuthService<U, B, R> {
    users: Arc<U>,
    blacklist: Arc<B>,
    refresh_tokens: Arc<R>,
    codec: TokenCodec,
    bcrypt_cost: u32,
}

impl<U, B, R> AuthService<U, B, R>
where
    U: UserRepository,
    B: TokenBlacklistRepository,
    R: RefreshTokenRepository,
{
    pub fn new(
        users: Arc<U>,
        blacklist: Arc<B>,
        refresh_tokens: Arc<R>,
        codec: TokenCodec,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            users,
            blacklist,
            refresh_tokens,
            codec,
            bcrypt_cost,
        }
    }

    /// Create a new account.
    ///
    /// The username/email existence lookups are an optimisation for a
    /// friendly error; the database uniqueness constraints remain the
    /// authoritative guard, and the store surfaces a constraint violation
    /// as the matching `*Exists` error.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, DomainError> {
        if self.users.find_by_username(username).await?.is_some() {
            return Err(AuthError::UsernameExists.into());
        }
        if self.users.find_by_email(email).await?.is_some() {
            return Err(AuthError::EmailExists.into());
        }

        let password_hash = bcrypt::hash(password, self.bcrypt_cost).map_err(|e| {
            error!("bcrypt hash failed: {}", e);
            DomainError::Auth(AuthError::PasswordHashFailed)
        })?;

        self.users
            .create(User::new(username, email, password_hash))
            .await
    }

    /// Authenticate and issue a token pair.
    ///
    /// Unknown username and wrong password are indistinguishable to the
    /// caller: both are `InvalidCredentials`.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(User, LoginTokens), DomainError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password_matches = bcrypt::verify(password, &user.password_hash)
            .map_err(|_| DomainError::Auth(AuthError::InvalidCredentials))?;
        if !password_matches {
            return Err(AuthError::InvalidCredentials.into());
        }

        let tokens = self.issue_token_pair(&user).await?;
        Ok((user, tokens))
    }

    /// Verify an access token and return its claims.
    ///
    /// Succeeds iff the signature is valid, `now < exp`, the claim shape
    /// matches, and the `jti` is not actively blacklisted.
    pub async fn validate_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        let claims = self.codec.decode(token)?;

        if self.blacklist.contains(&claims.jti).await? {
            return Err(TokenError::Revoked.into());
        }

        Ok(claims)
    }

    /// Revoke an access token by blacklisting its `jti` until its natural
    /// expiry.
    ///
    /// An expired signature still yields a usable `jti`/`exp`, so logging
    /// out an expired token succeeds; combined with the idempotent
    /// blacklist insert this makes double-logout a no-op success. Refresh
    /// tokens are untouched; callers wanting logout-everywhere also call
    /// [`Self::revoke_all_refresh_tokens`].
    pub async fn logout(&self, token: &str) -> Result<(), DomainError> {
        let claims = self.codec.decode_allow_expired(token)?;
        let expires_at = claims
            .expires_at()
            .ok_or(DomainError::Token(TokenError::InvalidClaims))?;

        self.blacklist.add(&claims.jti, expires_at).await
    }

    /// Rotate a refresh token: revoke the presented one and issue a new
    /// pair.
    ///
    /// The conditional revoke is the linearisation point. Two concurrent
    /// calls with the same token both pass the usability check, but only
    /// the one whose revoke flips the row proceeds to issuance; the loser
    /// gets `RefreshInvalid`. If the new refresh token cannot be stored
    /// after the old one is revoked, the error stands and the user must
    /// log in again - a lost session is preferred over a window in which
    /// a stolen old handle stays valid.
    pub async fn refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<(User, LoginTokens), DomainError> {
        let record = self
            .refresh_tokens
            .find(refresh_token)
            .await?
            .ok_or(TokenError::RefreshInvalid)?;
        if !record.is_usable() {
            return Err(TokenError::RefreshInvalid.into());
        }

        let user = self
            .users
            .find_by_id(record.user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !self.refresh_tokens.revoke(refresh_token).await? {
            // someone else rotated this token first
            warn!("refresh token {} lost a rotation race", record.token_id);
            return Err(TokenError::RefreshInvalid.into());
        }

        let access_token = self.codec.issue_access_token(user.id, &user.username)?;
        let new_refresh_token = self.issue_refresh_token(user.id).await?;

        let tokens = LoginTokens {
            access_token,
            refresh_token: new_refresh_token,
            expires_in: self.codec.access_token_lifetime_secs(),
        };
        Ok((user, tokens))
    }

    /// Load a user by id, for authenticated profile reads.
    pub async fn get_user(&self, user_id: i64) -> Result<User, DomainError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }

    /// Update username/email and optionally the password.
    ///
    /// Collisions with the user's own current values are permitted. A
    /// non-empty `new_password` requires the current password to verify.
    /// Existing access tokens stay valid after a password change.
    pub async fn update_profile(
        &self,
        user_id: i64,
        username: &str,
        email: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<User, DomainError> {
        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if username != user.username {
            if let Some(existing) = self.users.find_by_username(username).await? {
                if existing.id != user_id {
                    return Err(AuthError::UsernameExists.into());
                }
            }
        }
        if email != user.email {
            if let Some(existing) = self.users.find_by_email(email).await? {
                if existing.id != user_id {
                    return Err(AuthError::EmailExists.into());
                }
            }
        }

        if !new_password.is_empty() {
            let current_matches = bcrypt::verify(current_password, &user.password_hash)
                .map_err(|_| DomainError::Auth(AuthError::CurrentPasswordIncorrect))?;
            if !current_matches {
                return Err(AuthError::CurrentPasswordIncorrect.into());
            }

            user.password_hash = bcrypt::hash(new_password, self.bcrypt_cost).map_err(|e| {
                error!("bcrypt hash failed: {}", e);
                DomainError::Auth(AuthError::PasswordHashFailed)
            })?;
        }

        user.username = username.to_string();
        user.email = email.to_string();

        self.users.update(user).await
    }

    /// Revoke every active refresh token of a user (logout everywhere).
    pub async fn revoke_all_refresh_tokens(&self, user_id: i64) -> Result<u64, DomainError> {
        self.refresh_tokens.revoke_all_for_user(user_id).await
    }

    /// Issue and persist a refresh token, then the access token.
    ///
    /// The order matters for the failure path: if the access token cannot
    /// be issued after the refresh token is stored, the refresh token is
    /// revoked before the error returns so no dangling handle survives.
    async fn issue_token_pair(&self, user: &User) -> Result<LoginTokens, DomainError> {
        let refresh_token = self.issue_refresh_token(user.id).await?;

        let access_token = match self.codec.issue_access_token(user.id, &user.username) {
            Ok(token) => token,
            Err(e) => {
                if let Err(revoke_err) = self.refresh_tokens.revoke(&refresh_token).await {
                    error!(
                        "failed to revoke refresh token after issuance error: {}",
                        revoke_err
                    );
                }
                return Err(e);
            }
        };

        Ok(LoginTokens {
            access_token,
            refresh_token,
            expires_in: self.codec.access_token_lifetime_secs(),
        })
    }

    async fn issue_refresh_token(&self, user_id: i64) -> Result<String, DomainError> {
        let token_id = generate_token_id()?;
        let record = RefreshTokenRecord::new(
            token_id.clone(),
            user_id,
            self.codec.refresh_token_lifetime(),
        );

        self.refresh_tokens.store(record).await.map_err(|e| {
            error!("failed to store refresh token: {}", e);
            DomainError::Token(TokenError::IssuanceFailed)
        })?;

        Ok(token_id)
    }
}
