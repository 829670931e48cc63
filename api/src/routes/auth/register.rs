//! Handler for POST /api/v1/register

use actix_web::{web, HttpResponse};

use crate::dto::auth::{RegisterRequest, RegisterResponse};
use crate::handlers::error::error_response;
use crate::routes::AppState;

use todo_core::repositories::{
    RefreshTokenRepository, TodoRepository, TokenBlacklistRepository, UserRepository,
};

/// Create a new account.
///
/// # Responses
/// - 201: user summary
/// - 400: validation failure with a per-field detail map
/// - 409: `USERNAME_EXISTS` / `EMAIL_EXISTS`
pub async fn register<U, B, R, T>(
    state: web::Data<AppState<U, B, R, T>>,
    payload: web::Json<RegisterRequest>,
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
        .register(&payload.username, &payload.email, &payload.password)
        .await
    {
        Ok(user) => HttpResponse::Created().json(RegisterResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            message: "User created successfully".to_string(),
        }),
        Err(error) => error_response(&error),
    }
}
