//! Handler for POST /api/v1/logout

use actix_web::{http::header::AUTHORIZATION, web, HttpRequest, HttpResponse};

use crate::dto::auth::LogoutResponse;
use crate::handlers::error::{error_response, token_required_response};
use crate::middleware::auth::AUTH_COOKIE_NAME;
use crate::routes::AppState;

use todo_core::repositories::{
    RefreshTokenRepository, TodoRepository, TokenBlacklistRepository, UserRepository,
};

use super::removal_cookie;

/// Revoke the presented access token and delete the session cookie.
///
/// The token is taken from the Authorization header first, then the
/// cookie; no token at all is a 400. Expired tokens still log out
/// successfully, and logging out twice is not an error - the blacklist
/// insert is idempotent. Refresh tokens are left alone.
pub async fn logout<U, B, R, T>(
    req: HttpRequest,
    state: web::Data<AppState<U, B, R, T>>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    B: TokenBlacklistRepository + 'static,
    R: RefreshTokenRepository + 'static,
    T: TodoRepository + 'static,
{
    let token = match extract_logout_token(&req) {
        Some(token) => token,
        None => return token_required_response(),
    };

    match state.auth_service.logout(&token).await {
        Ok(()) => HttpResponse::Ok()
            .cookie(removal_cookie(state.cookie_secure))
            .json(LogoutResponse {
                message: "Logout successful".to_string(),
            }),
        Err(error) => error_response(&error),
    }
}

fn extract_logout_token(req: &HttpRequest) -> Option<String> {
    let bearer = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.to_string());
    if bearer.is_some() {
        return bearer;
    }

    req.cookie(AUTH_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
}
