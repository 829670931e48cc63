//! JWT authentication middleware (the auth guard).
//!
//! Extracts a bearer token from the request - the `auth_token` cookie
//! first, the `Authorization: Bearer` header as a fallback - validates it
//! through the auth service, and injects the resulting [`AuthContext`]
//! into the request extensions for handlers to pick up via `FromRequest`.
//!
//! Two modes:
//! - [`JwtAuth::required`] rejects unauthenticated requests with the JSON
//!   error envelope (401 `UNAUTHORIZED` with no token, the token's own
//!   taxonomy code otherwise).
//! - [`JwtAuth::optional`] lets every failure fall through to the handler
//!   with no context attached.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use todo_core::domain::entities::token::Claims;
use todo_core::errors::DomainError;
use todo_core::repositories::{
    RefreshTokenRepository, TokenBlacklistRepository, UserRepository,
};
use todo_core::services::auth::AuthService;

use crate::handlers::error::{error_response, unauthorized_response};

/// Cookie carrying the access token.
pub const AUTH_COOKIE_NAME: &str = "auth_token";

/// Authenticated caller identity injected into request extensions.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: i64,
    pub username: String,
    pub jti: String,
}

impl AuthContext {
    fn from_claims(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username,
            jti: claims.jti,
        }
    }
}

/// Validation seam between the guard and the auth service, so the
/// middleware can be wired against any store composition (and mocks in
/// tests) through a trait object in app data.
#[async_trait]
pub trait AccessTokenValidator: Send + Sync {
    async fn validate_access_token(&self, token: &str) -> Result<Claims, DomainError>;
}

#[async_trait]
impl<U, B, R> AccessTokenValidator for AuthService<U, B, R>
where
    U: UserRepository + 'static,
    B: TokenBlacklistRepository + 'static,
    R: RefreshTokenRepository + 'static,
{
    async fn validate_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        AuthService::validate_access_token(self, token).await
    }
}

/// JWT authentication middleware factory.
pub struct JwtAuth {
    required: bool,
}

impl JwtAuth {
    /// Reject unauthenticated requests.
    pub fn required() -> Self {
        Self { required: true }
    }

    /// Fall through on missing or invalid tokens.
    pub fn optional() -> Self {
        Self { required: false }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            required: self.required,
        }))
    }
}

pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    required: bool,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let required = self.required;

        Box::pin(async move {
            let token = match extract_token(&req) {
                Some(token) => token,
                None => {
                    if required {
                        return Err(missing_token_error());
                    }
                    return service.call(req).await;
                }
            };

            let validator = match req
                .app_data::<web::Data<Arc<dyn AccessTokenValidator>>>()
            {
                Some(validator) => Arc::clone(validator.get_ref()),
                None => {
                    return Err(actix_web::error::ErrorInternalServerError(
                        "token validator not configured",
                    ));
                }
            };

            match validator.validate_access_token(&token).await {
                Ok(claims) => {
                    req.extensions_mut().insert(AuthContext::from_claims(claims));
                    service.call(req).await
                }
                Err(error) => {
                    if required {
                        return Err(domain_error(error));
                    }
                    service.call(req).await
                }
            }
        })
    }
}

/// Cookie takes precedence over the Authorization header.
fn extract_token(req: &ServiceRequest) -> Option<String> {
    if let Some(cookie) = req.request().cookie(AUTH_COOKIE_NAME) {
        return Some(cookie.value().to_string());
    }
    extract_bearer_token(req)
}

fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

fn missing_token_error() -> Error {
    InternalError::from_response("authentication required", unauthorized_response()).into()
}

fn domain_error(error: DomainError) -> Error {
    let response = error_response(&error);
    InternalError::from_response(error, response).into()
}

/// Extractor for required authentication. Only succeeds behind
/// `JwtAuth::required()` (or `optional()` with a valid token).
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(missing_token_error);
        ready(result)
    }
}

/// Extractor for optional authentication.
pub struct OptionalAuth(pub Option<AuthContext>);

impl FromRequest for OptionalAuth {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let auth = req.extensions().get::<AuthContext>().cloned();
        ready(Ok(OptionalAuth(auth)))
    }
}
