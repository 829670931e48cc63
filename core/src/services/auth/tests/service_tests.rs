//! AuthService behaviour tests against the in-memory stores.
//!
//! bcrypt cost is dialled down to the library minimum so the suite stays
//! fast; the cost parameter does not change any control flow under test.

use std::sync::Arc;

use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::{
    MockRefreshTokenRepository, MockTokenBlacklistRepository, MockUserRepository,
    RefreshTokenRepository, TokenBlacklistRepository, UserRepository,
};
use crate::services::auth::AuthService;
use crate::services::token::{TokenCodec, TokenConfig};

const TEST_BCRYPT_COST: u32 = 4;

type TestAuthService =
    AuthService<MockUserRepository, MockTokenBlacklistRepository, MockRefreshTokenRepository>;

struct TestHarness {
    service: TestAuthService,
    users: Arc<MockUserRepository>,
    blacklist: Arc<MockTokenBlacklistRepository>,
    refresh_tokens: Arc<MockRefreshTokenRepository>,
}

fn harness() -> TestHarness {
    harness_with_expiry(15)
}

fn harness_with_expiry(access_token_expiry_minutes: i64) -> TestHarness {
    let users = Arc::new(MockUserRepository::new());
    let blacklist = Arc::new(MockTokenBlacklistRepository::new());
    let refresh_tokens = Arc::new(MockRefreshTokenRepository::new());

    let codec = TokenCodec::new(TokenConfig {
        access_token_expiry_minutes,
        ..TokenConfig::default()
    });

    let service = AuthService::new(
        Arc::clone(&users),
        Arc::clone(&blacklist),
        Arc::clone(&refresh_tokens),
        codec,
        TEST_BCRYPT_COST,
    );

    TestHarness {
        service,
        users,
        blacklist,
        refresh_tokens,
    }
}

#[tokio::test]
async fn register_then_login_round_trip() {
    let h = harness();
    let user = h
        .service
        .register("alice", "a@example.com", "Secret123")
        .await
        .unwrap();
    assert_eq!(user.id, 1);
    assert_ne!(user.password_hash, "Secret123");

    let (logged_in, tokens) = h.service.login("alice", "Secret123").await.unwrap();
    assert_eq!(logged_in.id, user.id);
    assert_eq!(tokens.expires_in, 900);
    assert!(!tokens.access_token.is_empty());
    assert_eq!(tokens.refresh_token.len(), 32);
}

#[tokio::test]
async fn register_rejects_taken_username_and_email() {
    let h = harness();
    h.service
        .register("alice", "a@example.com", "Secret123")
        .await
        .unwrap();

    let err = h
        .service
        .register("alice", "b@example.com", "Secret123")
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::Auth(AuthError::UsernameExists));

    let err = h
        .service
        .register("bob", "a@example.com", "Secret123")
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::Auth(AuthError::EmailExists));
}

#[tokio::test]
async fn login_failure_is_uniform() {
    let h = harness();
    h.service
        .register("alice", "a@example.com", "Secret123")
        .await
        .unwrap();

    let unknown_user = h.service.login("mallory", "Secret123").await.unwrap_err();
    let wrong_password = h.service.login("alice", "WrongPass1").await.unwrap_err();

    assert_eq!(unknown_user, DomainError::Auth(AuthError::InvalidCredentials));
    assert_eq!(wrong_password, unknown_user);
}

#[tokio::test]
async fn login_persists_the_refresh_token() {
    let h = harness();
    h.service
        .register("alice", "a@example.com", "Secret123")
        .await
        .unwrap();
    let (user, tokens) = h.service.login("alice", "Secret123").await.unwrap();

    let record = h
        .refresh_tokens
        .find(&tokens.refresh_token)
        .await
        .unwrap()
        .expect("refresh token stored");
    assert_eq!(record.user_id, user.id);
    assert!(record.is_usable());
}

#[tokio::test]
async fn validate_returns_issuance_identity() {
    let h = harness();
    h.service
        .register("alice", "a@example.com", "Secret123")
        .await
        .unwrap();
    let (user, tokens) = h.service.login("alice", "Secret123").await.unwrap();

    let claims = h
        .service
        .validate_access_token(&tokens.access_token)
        .await
        .unwrap();
    assert_eq!(claims.user_id, user.id);
    assert_eq!(claims.username, "alice");
}

#[tokio::test]
async fn logout_revokes_until_expiry() {
    let h = harness();
    h.service
        .register("alice", "a@example.com", "Secret123")
        .await
        .unwrap();
    let (_, tokens) = h.service.login("alice", "Secret123").await.unwrap();

    h.service.logout(&tokens.access_token).await.unwrap();

    let err = h
        .service
        .validate_access_token(&tokens.access_token)
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::Token(TokenError::Revoked));

    // logging out again is a success, not an error
    h.service.logout(&tokens.access_token).await.unwrap();
    assert_eq!(h.blacklist.len().await, 1);
}

#[tokio::test]
async fn logout_accepts_expired_tokens() {
    // negative lifetime issues already-expired tokens
    let h = harness_with_expiry(-1);
    h.service
        .register("alice", "a@example.com", "Secret123")
        .await
        .unwrap();
    let (_, tokens) = h.service.login("alice", "Secret123").await.unwrap();

    // expired for validation purposes...
    let err = h
        .service
        .validate_access_token(&tokens.access_token)
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::Token(TokenError::Expired));

    // ...but logout still lands the jti on the blacklist
    h.service.logout(&tokens.access_token).await.unwrap();
    assert_eq!(h.blacklist.len().await, 1);
}

#[tokio::test]
async fn expired_token_never_reverts_to_valid_after_gc() {
    let h = harness_with_expiry(-1);
    h.service
        .register("alice", "a@example.com", "Secret123")
        .await
        .unwrap();
    let (_, tokens) = h.service.login("alice", "Secret123").await.unwrap();
    h.service.logout(&tokens.access_token).await.unwrap();

    // the blacklist entry expired with the token; GC may remove it
    h.blacklist.cleanup_expired().await.unwrap();
    assert_eq!(h.blacklist.len().await, 0);

    let err = h
        .service
        .validate_access_token(&tokens.access_token)
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::Token(TokenError::Expired));
}

#[tokio::test]
async fn logout_rejects_garbage_tokens() {
    let h = harness();
    let err = h.service.logout("not-a-token").await.unwrap_err();
    assert_eq!(err, DomainError::Token(TokenError::Malformed));
    assert_eq!(h.blacklist.len().await, 0);
}

#[tokio::test]
async fn refresh_rotates_the_token_chain() {
    let h = harness();
    h.service
        .register("alice", "a@example.com", "Secret123")
        .await
        .unwrap();
    let (_, login_tokens) = h.service.login("alice", "Secret123").await.unwrap();
    let r1 = login_tokens.refresh_token;

    let (_, tokens2) = h.service.refresh_token(&r1).await.unwrap();
    let r2 = tokens2.refresh_token.clone();
    assert_ne!(r1, r2);

    // the presented token was revoked by rotation
    let err = h.service.refresh_token(&r1).await.unwrap_err();
    assert_eq!(err, DomainError::Token(TokenError::RefreshInvalid));

    // the replacement continues the chain
    let (_, tokens3) = h.service.refresh_token(&r2).await.unwrap();
    assert_ne!(tokens3.refresh_token, r2);
}

#[tokio::test]
async fn refresh_rejects_unknown_and_revoked_tokens() {
    let h = harness();
    h.service
        .register("alice", "a@example.com", "Secret123")
        .await
        .unwrap();
    let (user, tokens) = h.service.login("alice", "Secret123").await.unwrap();

    let err = h.service.refresh_token("0000missing0000").await.unwrap_err();
    assert_eq!(err, DomainError::Token(TokenError::RefreshInvalid));

    h.service.revoke_all_refresh_tokens(user.id).await.unwrap();
    let err = h.service.refresh_token(&tokens.refresh_token).await.unwrap_err();
    assert_eq!(err, DomainError::Token(TokenError::RefreshInvalid));
}

#[tokio::test]
async fn concurrent_refresh_has_at_most_one_winner() {
    let h = harness();
    h.service
        .register("alice", "a@example.com", "Secret123")
        .await
        .unwrap();
    let (_, tokens) = h.service.login("alice", "Secret123").await.unwrap();
    let r1 = tokens.refresh_token;

    let (a, b) = tokio::join!(h.service.refresh_token(&r1), h.service.refresh_token(&r1));

    let successes = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(successes, 1);
    for result in [a, b] {
        if let Err(e) = result {
            assert_eq!(e, DomainError::Token(TokenError::RefreshInvalid));
        }
    }
}

#[tokio::test]
async fn update_profile_checks_collisions_against_other_users_only() {
    let h = harness();
    let alice = h
        .service
        .register("alice", "a@example.com", "Secret123")
        .await
        .unwrap();
    h.service
        .register("bob", "b@example.com", "Secret123")
        .await
        .unwrap();

    let err = h
        .service
        .update_profile(alice.id, "bob", "a@example.com", "", "")
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::Auth(AuthError::UsernameExists));

    let err = h
        .service
        .update_profile(alice.id, "alice", "b@example.com", "", "")
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::Auth(AuthError::EmailExists));

    // keeping your own values is not a collision
    let updated = h
        .service
        .update_profile(alice.id, "alice", "a@example.com", "", "")
        .await
        .unwrap();
    assert_eq!(updated.username, "alice");
}

#[tokio::test]
async fn update_profile_password_change_requires_current_password() {
    let h = harness();
    let alice = h
        .service
        .register("alice", "a@example.com", "Secret123")
        .await
        .unwrap();

    let err = h
        .service
        .update_profile(alice.id, "alice", "a@example.com", "WrongPass1", "NewSecret1")
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::Auth(AuthError::CurrentPasswordIncorrect));

    h.service
        .update_profile(alice.id, "alice", "a@example.com", "Secret123", "NewSecret1")
        .await
        .unwrap();

    // old password is dead, new one works
    let err = h.service.login("alice", "Secret123").await.unwrap_err();
    assert_eq!(err, DomainError::Auth(AuthError::InvalidCredentials));
    h.service.login("alice", "NewSecret1").await.unwrap();
}

#[tokio::test]
async fn password_hash_never_stores_the_plaintext() {
    let h = harness();
    let user = h
        .service
        .register("alice", "a@example.com", "Secret123")
        .await
        .unwrap();
    assert_ne!(user.password_hash, "Secret123");

    let updated = h
        .service
        .update_profile(user.id, "alice", "a@example.com", "Secret123", "NewSecret1")
        .await
        .unwrap();
    assert_ne!(updated.password_hash, "NewSecret1");
    assert_ne!(updated.password_hash, "Secret123");

    let stored = h.users.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.password_hash, updated.password_hash);
}

#[tokio::test]
async fn update_profile_for_missing_user_fails() {
    let h = harness();
    let err = h
        .service
        .update_profile(99, "ghost", "g@example.com", "", "")
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::Auth(AuthError::UserNotFound));
}
