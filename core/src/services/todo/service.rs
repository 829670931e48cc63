//! Todo service implementation.
//!
//! Thin orchestration over the todo store. The interesting guarantee is
//! scoping: every call takes the authenticated `user_id` and the store
//! treats foreign rows as missing, so one user can never read or mutate
//! another's todos.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::entities::todo::{Todo, TodoSort};
use crate::errors::DomainError;
use crate::repositories::TodoRepository;

pub struct TodoService<T> {
    todos: Arc<T>,
}

impl<T> TodoService<T>
where
    T: TodoRepository,
{
    pub fn new(todos: Arc<T>) -> Self {
        Self { todos }
    }

    pub async fn create(
        &self,
        user_id: i64,
        title: &str,
        due_date: Option<NaiveDate>,
        priority: i32,
    ) -> Result<Todo, DomainError> {
        self.todos
            .create(Todo::new(user_id, title, due_date, priority))
            .await
    }

    pub async fn get(&self, user_id: i64, todo_id: i64) -> Result<Todo, DomainError> {
        self.todos
            .find(user_id, todo_id)
            .await?
            .ok_or(DomainError::TodoNotFound)
    }

    pub async fn list(
        &self,
        user_id: i64,
        sort: Option<TodoSort>,
    ) -> Result<Vec<Todo>, DomainError> {
        self.todos.list(user_id, sort).await
    }

    pub async fn update(&self, user_id: i64, todo: Todo) -> Result<Todo, DomainError> {
        self.todos
            .update(user_id, todo)
            .await?
            .ok_or(DomainError::TodoNotFound)
    }

    pub async fn delete(&self, user_id: i64, todo_id: i64) -> Result<(), DomainError> {
        if !self.todos.delete(user_id, todo_id).await? {
            return Err(DomainError::TodoNotFound);
        }
        Ok(())
    }

    pub async fn toggle_complete(&self, user_id: i64, todo_id: i64) -> Result<Todo, DomainError> {
        self.todos
            .toggle_complete(user_id, todo_id)
            .await?
            .ok_or(DomainError::TodoNotFound)
    }
}
