//! Todo repository trait.

use async_trait::async_trait;

use crate::domain::entities::todo::{Todo, TodoSort};
use crate::errors::DomainError;

/// Store interface for `Todo` records.
///
/// Every operation is scoped by `user_id`: a row owned by another user is
/// indistinguishable from a missing row.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    async fn create(&self, todo: Todo) -> Result<Todo, DomainError>;

    async fn find(&self, user_id: i64, todo_id: i64) -> Result<Option<Todo>, DomainError>;

    /// `None` sort means newest first.
    async fn list(&self, user_id: i64, sort: Option<TodoSort>) -> Result<Vec<Todo>, DomainError>;

    /// Update title/due_date/priority/is_completed; `None` when the row
    /// does not exist for this user.
    async fn update(&self, user_id: i64, todo: Todo) -> Result<Option<Todo>, DomainError>;

    /// Returns whether a row was deleted.
    async fn delete(&self, user_id: i64, todo_id: i64) -> Result<bool, DomainError>;

    /// Flip `is_completed` and return the updated row.
    async fn toggle_complete(&self, user_id: i64, todo_id: i64) -> Result<Option<Todo>, DomainError>;
}
