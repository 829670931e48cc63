//! Handler for GET /api/v1/todos

use actix_web::{web, HttpResponse};

use crate::dto::todo::{TodoListQuery, TodoResponse};
use crate::handlers::error::error_response;
use crate::middleware::auth::AuthContext;
use crate::routes::AppState;

use todo_core::domain::entities::todo::TodoSort;
use todo_core::repositories::{
    RefreshTokenRepository, TodoRepository, TokenBlacklistRepository, UserRepository,
};

/// List the caller's todos, optionally sorted (`?sort=due_date_asc` etc.;
/// unknown values fall back to newest first).
pub async fn list_todos<U, B, R, T>(
    state: web::Data<AppState<U, B, R, T>>,
    auth: AuthContext,
    query: web::Query<TodoListQuery>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    B: TokenBlacklistRepository + 'static,
    R: RefreshTokenRepository + 'static,
    T: TodoRepository + 'static,
{
    let sort = query.sort.as_deref().and_then(TodoSort::parse);

    match state.todo_service.list(auth.user_id, sort).await {
        Ok(todos) => {
            let body: Vec<TodoResponse> = todos.iter().map(TodoResponse::from).collect();
            HttpResponse::Ok().json(body)
        }
        Err(error) => error_response(&error),
    }
}
