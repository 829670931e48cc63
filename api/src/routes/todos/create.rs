//! Handler for POST /api/v1/todos

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::todo::{parse_due_date, to_validation_error, CreateTodoRequest, TodoResponse};
use crate::handlers::error::{error_response, invalid_date_response};
use crate::middleware::auth::AuthContext;
use crate::routes::AppState;

use todo_core::repositories::{
    RefreshTokenRepository, TodoRepository, TokenBlacklistRepository, UserRepository,
};

/// Create a todo for the authenticated user.
pub async fn create_todo<U, B, R, T>(
    state: web::Data<AppState<U, B, R, T>>,
    auth: AuthContext,
    payload: web::Json<CreateTodoRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    B: TokenBlacklistRepository + 'static,
    R: RefreshTokenRepository + 'static,
    T: TodoRepository + 'static,
{
    if let Err(errors) = payload.validate() {
        return error_response(&to_validation_error(&errors));
    }
    let due_date = match parse_due_date(payload.due_date.as_deref()) {
        Ok(due_date) => due_date,
        Err(()) => return invalid_date_response(),
    };

    match state
        .todo_service
        .create(auth.user_id, &payload.title, due_date, payload.priority)
        .await
    {
        Ok(todo) => HttpResponse::Created().json(TodoResponse::from(&todo)),
        Err(error) => error_response(&error),
    }
}
