//! Handler for POST /api/v1/refresh

use actix_web::{web, HttpResponse};

use crate::dto::auth::{RefreshTokenRequest, RefreshTokenResponse};
use crate::handlers::error::error_response;
use crate::routes::AppState;

use todo_core::errors::DomainError;
use todo_core::repositories::{
    RefreshTokenRepository, TodoRepository, TokenBlacklistRepository, UserRepository,
};

use super::auth_cookie;

/// Exchange a refresh token for a fresh pair (rotation).
///
/// The presented token is revoked whether or not the exchange completes;
/// a token that loses a concurrent rotation race gets `REFRESH_INVALID`
/// like any other dead handle. The new access token also replaces the
/// session cookie.
pub async fn refresh<U, B, R, T>(
    state: web::Data<AppState<U, B, R, T>>,
    payload: web::Json<RefreshTokenRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    B: TokenBlacklistRepository + 'static,
    R: RefreshTokenRepository + 'static,
    T: TodoRepository + 'static,
{
    if payload.refresh_token.is_empty() {
        return error_response(&DomainError::validation_field(
            "refresh_token",
            "リフレッシュトークンは必須です",
        ));
    }

    match state.auth_service.refresh_token(&payload.refresh_token).await {
        Ok((_user, tokens)) => {
            let cookie = auth_cookie(&tokens.access_token, tokens.expires_in, state.cookie_secure);
            HttpResponse::Ok().cookie(cookie).json(RefreshTokenResponse {
                access_token: tokens.access_token,
                refresh_token: tokens.refresh_token,
                expires_in: tokens.expires_in,
            })
        }
        Err(error) => error_response(&error),
    }
}
