//! Handlers for GET/PUT/DELETE /api/v1/todos/{id}

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::todo::{parse_due_date, to_validation_error, TodoResponse, UpdateTodoRequest};
use crate::handlers::error::{error_response, invalid_date_response};
use crate::middleware::auth::AuthContext;
use crate::routes::AppState;

use todo_core::domain::entities::todo::Todo;
use todo_core::repositories::{
    RefreshTokenRepository, TodoRepository, TokenBlacklistRepository, UserRepository,
};

/// Fetch one todo; foreign rows are 404.
pub async fn get_todo<U, B, R, T>(
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
    match state.todo_service.get(auth.user_id, path.into_inner()).await {
        Ok(todo) => HttpResponse::Ok().json(TodoResponse::from(&todo)),
        Err(error) => error_response(&error),
    }
}

/// Replace a todo's title, due date, priority and completion state.
pub async fn update_todo<U, B, R, T>(
    state: web::Data<AppState<U, B, R, T>>,
    auth: AuthContext,
    path: web::Path<i64>,
    payload: web::Json<UpdateTodoRequest>,
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

    let todo = Todo {
        id: path.into_inner(),
        is_completed: payload.is_completed,
        ..Todo::new(auth.user_id, payload.title.clone(), due_date, payload.priority)
    };

    match state.todo_service.update(auth.user_id, todo).await {
        Ok(updated) => HttpResponse::Ok().json(TodoResponse::from(&updated)),
        Err(error) => error_response(&error),
    }
}

/// Delete a todo; 204 on success.
pub async fn delete_todo<U, B, R, T>(
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
        .delete(auth.user_id, path.into_inner())
        .await
    {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(error) => error_response(&error),
    }
}
