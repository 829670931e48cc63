//! Handler for GET /api/v1/me

use actix_web::{web, HttpResponse};

use crate::dto::auth::UserResponse;
use crate::handlers::error::error_response;
use crate::middleware::auth::AuthContext;
use crate::routes::AppState;

use todo_core::repositories::{
    RefreshTokenRepository, TodoRepository, TokenBlacklistRepository, UserRepository,
};

/// Return the authenticated user's summary.
pub async fn me<U, B, R, T>(
    state: web::Data<AppState<U, B, R, T>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    B: TokenBlacklistRepository + 'static,
    R: RefreshTokenRepository + 'static,
    T: TodoRepository + 'static,
{
    match state.auth_service.get_user(auth.user_id).await {
        Ok(user) => HttpResponse::Ok().json(UserResponse::from(&user)),
        Err(error) => error_response(&error),
    }
}
