//! Handler for PATCH /api/v1/todos/{id}/toggle

use actix_web::{web, HttpResponse};

use crate::dto::todo::TodoResponse;
use crate::handlers::error::error_response;
use crate::middleware::auth::AuthContext;
use crate::routes::AppState;

use todo_core::repositories::{
    RefreshTokenRepository, TodoRepository, TokenBlacklistRepository, UserRepository,
};

/// Flip a todo's completion flag and return the updated row.
pub async fn toggle_todo<U, B, R, T>(
    state: web::Data<AppState<U, B, R, T>>,
    auth: AuthContext,
    path: web::Path<i64>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    B: TokenBlacklistRepository + 'static,
    R: RefreshTokenRepository + 'static,
    T: TodoRepository + 'static,
{
    match state
        .todo_service
        .toggle_complete(auth.user_id, path.into_inner())
        .await
    {
        Ok(todo) => HttpResponse::Ok().json(TodoResponse::from(&todo)),
        Err(error) => error_response(&error),
    }
}
