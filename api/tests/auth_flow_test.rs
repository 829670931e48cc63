//! End-to-end auth flows over the full actix app with in-memory stores.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web, Error};
use serde_json::{json, Value};

use todo_api::app::create_app;
use todo_api::routes::AppState;
use todo_core::repositories::{
    MockRefreshTokenRepository, MockTodoRepository, MockTokenBlacklistRepository,
    MockUserRepository,
};
use todo_core::services::auth::AuthService;
use todo_core::services::todo::TodoService;
use todo_core::services::token::{TokenCodec, TokenConfig};

type MockState = AppState<
    MockUserRepository,
    MockTokenBlacklistRepository,
    MockRefreshTokenRepository,
    MockTodoRepository,
>;

fn test_state() -> web::Data<MockState> {
    let users = Arc::new(MockUserRepository::new());
    let blacklist = Arc::new(MockTokenBlacklistRepository::new());
    let refresh_tokens = Arc::new(MockRefreshTokenRepository::new());
    let todos = Arc::new(MockTodoRepository::new());

    let auth_service = Arc::new(AuthService::new(
        users,
        blacklist,
        refresh_tokens,
        TokenCodec::new(TokenConfig::default()),
        4, // minimum bcrypt cost keeps the suite fast
    ));
    let todo_service = Arc::new(TodoService::new(todos));

    web::Data::new(AppState {
        auth_service,
        todo_service,
        cookie_secure: false,
    })
}

async fn register_alice<S, B>(app: &S)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/register")
        .set_json(json!({
            "username": "alice",
            "email": "a@example.com",
            "password": "Secret123"
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
}

/// Log in as alice; returns (access_token, refresh_token).
async fn login_alice<S, B>(app: &S) -> (String, String)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({"username": "alice", "password": "Secret123"}))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let access_token = resp
        .response()
        .cookies()
        .find(|c| c.name() == "auth_token")
        .expect("auth_token cookie")
        .value()
        .to_string();
    let body: Value = test::read_body_json(resp).await;
    let refresh_token = body["refresh_token"].as_str().unwrap().to_string();
    (access_token, refresh_token)
}

#[actix_web::test]
async fn register_returns_the_created_user() {
    let app = test::init_service(create_app(test_state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/register")
        .set_json(json!({
            "username": "alice",
            "email": "a@example.com",
            "password": "Secret123"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "a@example.com");
    assert_eq!(body["message"], "User created successfully");
}

#[actix_web::test]
async fn duplicate_username_is_a_field_level_conflict() {
    let app = test::init_service(create_app(test_state())).await;
    register_alice(&app).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/register")
        .set_json(json!({
            "username": "alice",
            "email": "b@example.com",
            "password": "Secret123"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "USERNAME_EXISTS");
    assert_eq!(body["details"]["username"], "このユーザー名は既に使用されています");
}

#[actix_web::test]
async fn register_validation_collects_field_errors() {
    let app = test::init_service(create_app(test_state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/register")
        .set_json(json!({"username": "a", "email": "nope", "password": "short"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert!(body["details"]["username"].is_string());
    assert!(body["details"]["email"].is_string());
    assert!(body["details"]["password"].is_string());
}

#[actix_web::test]
async fn malformed_json_body_is_invalid_json() {
    let app = test::init_service(create_app(test_state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/register")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "INVALID_JSON");
}

#[actix_web::test]
async fn login_sets_a_session_cookie_with_the_token_lifetime() {
    let app = test::init_service(create_app(test_state())).await;
    register_alice(&app).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({"username": "alice", "password": "Secret123"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "auth_token")
        .expect("auth_token cookie");
    assert_eq!(
        cookie.max_age(),
        Some(actix_web::cookie::time::Duration::seconds(900))
    );
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.http_only(), Some(true));
    drop(cookie);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["id"], 1);
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["message"], "Login successful");
    assert!(body["refresh_token"].is_string());
}

#[actix_web::test]
async fn login_failures_are_uniform_401s() {
    let app = test::init_service(create_app(test_state())).await;
    register_alice(&app).await;

    for payload in [
        json!({"username": "alice", "password": "WrongPass1"}),
        json!({"username": "mallory", "password": "Secret123"}),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "INVALID_CREDENTIALS");
        assert!(body.get("details").is_none());
    }
}

#[actix_web::test]
async fn me_accepts_cookie_and_bearer_token() {
    let app = test::init_service(create_app(test_state())).await;
    register_alice(&app).await;
    let (access_token, _) = login_alice(&app).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/me")
        .cookie(Cookie::new("auth_token", access_token.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["username"], "alice");

    let req = test::TestRequest::get()
        .uri("/api/v1/me")
        .insert_header(("Authorization", format!("Bearer {}", access_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn me_without_a_token_is_unauthorized() {
    let app = test::init_service(create_app(test_state())).await;

    let req = test::TestRequest::get().uri("/api/v1/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[actix_web::test]
async fn me_with_a_garbage_token_is_token_invalid() {
    let app = test::init_service(create_app(test_state())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/me")
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "TOKEN_INVALID");
}

#[actix_web::test]
async fn logout_revokes_the_session() {
    let app = test::init_service(create_app(test_state())).await;
    register_alice(&app).await;
    let (access_token, _) = login_alice(&app).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/logout")
        .cookie(Cookie::new("auth_token", access_token.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // the cookie is deleted client-side...
    let removal = resp
        .response()
        .cookies()
        .find(|c| c.name() == "auth_token")
        .expect("removal cookie");
    assert_eq!(removal.value(), "");
    drop(removal);

    // ...and the token is dead server-side even if replayed
    let req = test::TestRequest::get()
        .uri("/api/v1/me")
        .cookie(Cookie::new("auth_token", access_token.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "TOKEN_REVOKED");

    // double logout succeeds
    let req = test::TestRequest::post()
        .uri("/api/v1/logout")
        .cookie(Cookie::new("auth_token", access_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn logout_without_a_token_is_a_bad_request() {
    let app = test::init_service(create_app(test_state())).await;

    let req = test::TestRequest::post().uri("/api/v1/logout").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn refresh_rotates_and_kills_the_old_handle() {
    let app = test::init_service(create_app(test_state())).await;
    register_alice(&app).await;
    let (_, r1) = login_alice(&app).await;

    // r1 -> r2
    let req = test::TestRequest::post()
        .uri("/api/v1/refresh")
        .set_json(json!({"refresh_token": r1}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["expires_in"], 900);
    let r2 = body["refresh_token"].as_str().unwrap().to_string();
    assert_ne!(r1, r2);

    // replaying r1 fails
    let req = test::TestRequest::post()
        .uri("/api/v1/refresh")
        .set_json(json!({"refresh_token": r1}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "REFRESH_INVALID");

    // r2 -> r3 continues the chain
    let req = test::TestRequest::post()
        .uri("/api/v1/refresh")
        .set_json(json!({"refresh_token": r2}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_ne!(body["refresh_token"].as_str().unwrap(), r2);
}

#[actix_web::test]
async fn refreshed_access_token_is_usable() {
    let app = test::init_service(create_app(test_state())).await;
    register_alice(&app).await;
    let (_, r1) = login_alice(&app).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/refresh")
        .set_json(json!({"refresh_token": r1}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    let access_token = body["access_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/v1/me")
        .insert_header(("Authorization", format!("Bearer {}", access_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn profile_update_and_password_change_flow() {
    let app = test::init_service(create_app(test_state())).await;
    register_alice(&app).await;
    let (access_token, _) = login_alice(&app).await;

    // wrong current password
    let req = test::TestRequest::put()
        .uri("/api/v1/profile")
        .cookie(Cookie::new("auth_token", access_token.clone()))
        .set_json(json!({
            "username": "alice",
            "email": "a@example.com",
            "current_password": "WrongPass1",
            "new_password": "NewSecret1"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "CURRENT_PASSWORD_INCORRECT");

    // successful rename + password change
    let req = test::TestRequest::put()
        .uri("/api/v1/profile")
        .cookie(Cookie::new("auth_token", access_token.clone()))
        .set_json(json!({
            "username": "alice_2",
            "email": "a@example.com",
            "current_password": "Secret123",
            "new_password": "NewSecret1"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["username"], "alice_2");
    assert_eq!(body["message"], "Profile updated successfully");

    // the old session token remains valid after the password change
    let req = test::TestRequest::get()
        .uri("/api/v1/me")
        .cookie(Cookie::new("auth_token", access_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // the new credentials work for a fresh login
    let req = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({"username": "alice_2", "password": "NewSecret1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn profile_rejects_another_users_username() {
    let app = test::init_service(create_app(test_state())).await;
    register_alice(&app).await;
    let req = test::TestRequest::post()
        .uri("/api/v1/register")
        .set_json(json!({
            "username": "bob",
            "email": "b@example.com",
            "password": "Secret123"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let (access_token, _) = login_alice(&app).await;
    let req = test::TestRequest::put()
        .uri("/api/v1/profile")
        .cookie(Cookie::new("auth_token", access_token))
        .set_json(json!({"username": "bob", "email": "a@example.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "USERNAME_EXISTS");
}

#[actix_web::test]
async fn health_check_is_public() {
    let app = test::init_service(create_app(test_state())).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
}
