//! Mock implementation of TodoRepository for testing

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::todo::{Todo, TodoSort};
use crate::errors::DomainError;

use super::r#trait::TodoRepository;

/// In-memory todo store.
#[derive(Default)]
pub struct MockTodoRepository {
    todos: Arc<RwLock<HashMap<i64, Todo>>>,
}

impl MockTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sort_todos(todos: &mut [Todo], sort: Option<TodoSort>) {
    match sort {
        Some(TodoSort::DueDateAsc) => {
            // NULL due dates last, like the SQL ordering
            todos.sort_by(|a, b| match (a.due_date, b.due_date) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => b.created_at.cmp(&a.created_at),
            });
        }
        Some(TodoSort::DueDateDesc) => {
            todos.sort_by(|a, b| match (a.due_date, b.due_date) {
                (Some(x), Some(y)) => y.cmp(&x),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => b.created_at.cmp(&a.created_at),
            });
        }
        Some(TodoSort::PriorityDesc) => {
            todos.sort_by(|a, b| {
                b.priority
                    .cmp(&a.priority)
                    .then(b.created_at.cmp(&a.created_at))
            });
        }
        Some(TodoSort::CreatedDesc) | None => {
            todos.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        }
    }
}

#[async_trait]
impl TodoRepository for MockTodoRepository {
    async fn create(&self, mut todo: Todo) -> Result<Todo, DomainError> {
        let mut todos = self.todos.write().await;
        let id = todos.keys().max().copied().unwrap_or(0) + 1;
        todo.id = id;
        let now = Utc::now();
        todo.created_at = now;
        todo.updated_at = now;
        todos.insert(id, todo.clone());
        Ok(todo)
    }

    async fn find(&self, user_id: i64, todo_id: i64) -> Result<Option<Todo>, DomainError> {
        let todos = self.todos.read().await;
        Ok(todos
            .get(&todo_id)
            .filter(|t| t.user_id == user_id)
            .cloned())
    }

    async fn list(&self, user_id: i64, sort: Option<TodoSort>) -> Result<Vec<Todo>, DomainError> {
        let todos = self.todos.read().await;
        let mut owned: Vec<Todo> = todos
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        sort_todos(&mut owned, sort);
        Ok(owned)
    }

    async fn update(&self, user_id: i64, todo: Todo) -> Result<Option<Todo>, DomainError> {
        let mut todos = self.todos.write().await;
        match todos.get_mut(&todo.id) {
            Some(existing) if existing.user_id == user_id => {
                existing.title = todo.title;
                existing.due_date = todo.due_date;
                existing.priority = todo.priority;
                existing.is_completed = todo.is_completed;
                existing.updated_at = Utc::now();
                Ok(Some(existing.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete(&self, user_id: i64, todo_id: i64) -> Result<bool, DomainError> {
        let mut todos = self.todos.write().await;
        match todos.get(&todo_id) {
            Some(existing) if existing.user_id == user_id => {
                todos.remove(&todo_id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn toggle_complete(
        &self,
        user_id: i64,
        todo_id: i64,
    ) -> Result<Option<Todo>, DomainError> {
        let mut todos = self.todos.write().await;
        match todos.get_mut(&todo_id) {
            Some(existing) if existing.user_id == user_id => {
                existing.is_completed = !existing.is_completed;
                existing.updated_at = Utc::now();
                Ok(Some(existing.clone()))
            }
            _ => Ok(None),
        }
    }
}
