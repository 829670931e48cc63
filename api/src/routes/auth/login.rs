//! Handler for POST /api/v1/login

use actix_web::{web, HttpResponse};

use crate::dto::auth::{LoginRequest, LoginResponse, UserResponse};
use crate::handlers::error::error_response;
use crate::routes::AppState;

use todo_core::repositories::{
    RefreshTokenRepository, TodoRepository, TokenBlacklistRepository, UserRepository,
};

use super::auth_cookie;

/// Authenticate and open a session.
///
/// The access token is set as the `auth_token` cookie (Max-Age = token
/// lifetime); the refresh token is returned in the body for rotation via
/// POST /api/v1/refresh. Credential failures are uniform 401s with no
/// field breakdown.
pub async fn login<U, B, R, T>(
    state: web::Data<AppState<U, B, R, T>>,
    payload: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    B: TokenBlacklistRepository + 'static,
    R: RefreshTokenRepository + 'static,
    T: TodoRepository + 'static,
{
    if let Err(error) = payload.validate() {
        return error_response(&error);
    }

    match state
        .auth_service
        .login(&payload.username, &payload.password)
        .await
    {
        Ok((user, tokens)) => {
            let cookie = auth_cookie(&tokens.access_token, tokens.expires_in, state.cookie_secure);
            HttpResponse::Ok().cookie(cookie).json(LoginResponse {
                user: UserResponse::from(&user),
                refresh_token: tokens.refresh_token,
                message: "Login successful".to_string(),
            })
        }
        Err(error) => error_response(&error),
    }
}
