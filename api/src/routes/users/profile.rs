//! Handler for PUT /api/v1/profile

use actix_web::{web, HttpResponse};

use crate::dto::auth::{UpdateProfileRequest, UpdateProfileResponse, UserResponse};
use crate::handlers::error::error_response;
use crate::middleware::auth::AuthContext;
use crate::routes::AppState;

use todo_core::repositories::{
    RefreshTokenRepository, TodoRepository, TokenBlacklistRepository, UserRepository,
};

/// Update username/email, optionally changing the password.
///
/// A non-empty `new_password` requires `current_password` to verify;
/// existing sessions stay valid after a password change.
pub async fn update_profile<U, B, R, T>(
    state: web::Data<AppState<U, B, R, T>>,
    auth: AuthContext,
    payload: web::Json<UpdateProfileRequest>,
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
        .update_profile(
            auth.user_id,
            &payload.username,
            &payload.email,
            &payload.current_password,
            &payload.new_password,
        )
        .await
    {
        Ok(user) => HttpResponse::Ok().json(UpdateProfileResponse {
            user: UserResponse::from(&user),
            message: "Profile updated successfully".to_string(),
        }),
        Err(error) => error_response(&error),
    }
}
