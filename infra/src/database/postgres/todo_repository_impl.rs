//! Postgres implementation of the TodoRepository trait.
//!
//! Every statement filters on `user_id`, so ownership is enforced in the
//! same place the data lives; a foreign row never reaches the caller.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use todo_core::domain::entities::todo::{Todo, TodoSort};
use todo_core::errors::DomainError;
use todo_core::repositories::TodoRepository;

use super::storage_error;

const TODO_COLUMNS: &str = "id, user_id, title, due_date, priority, is_completed, created_at, updated_at";

pub struct PgTodoRepository {
    pool: PgPool,
}

impl PgTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_todo(row: &PgRow) -> Result<Todo, DomainError> {
        Ok(Todo {
            id: row.try_get("id").map_err(storage_error)?,
            user_id: row.try_get("user_id").map_err(storage_error)?,
            title: row.try_get("title").map_err(storage_error)?,
            due_date: row
                .try_get::<Option<NaiveDate>, _>("due_date")
                .map_err(storage_error)?,
            priority: row.try_get("priority").map_err(storage_error)?,
            is_completed: row.try_get("is_completed").map_err(storage_error)?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(storage_error)?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(storage_error)?,
        })
    }

    // The sort key is a closed enum, so the ORDER BY clause is picked from
    // static strings; nothing user-controlled is spliced into SQL.
    fn order_clause(sort: Option<TodoSort>) -> &'static str {
        match sort {
            Some(TodoSort::DueDateAsc) => "ORDER BY due_date ASC NULLS LAST, created_at DESC",
            Some(TodoSort::DueDateDesc) => "ORDER BY due_date DESC NULLS LAST, created_at DESC",
            Some(TodoSort::PriorityDesc) => "ORDER BY priority DESC, created_at DESC",
            Some(TodoSort::CreatedDesc) | None => "ORDER BY created_at DESC, id DESC",
        }
    }
}

#[async_trait]
impl TodoRepository for PgTodoRepository {
    async fn create(&self, todo: Todo) -> Result<Todo, DomainError> {
        let query = format!(
            r#"
            INSERT INTO todos (user_id, title, due_date, priority, is_completed)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {TODO_COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(todo.user_id)
            .bind(&todo.title)
            .bind(todo.due_date)
            .bind(todo.priority)
            .bind(todo.is_completed)
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error)?;

        Self::row_to_todo(&row)
    }

    async fn find(&self, user_id: i64, todo_id: i64) -> Result<Option<Todo>, DomainError> {
        let query = format!(
            r#"
            SELECT {TODO_COLUMNS}
            FROM todos
            WHERE id = $1 AND user_id = $2
            "#
        );

        let row = sqlx::query(&query)
            .bind(todo_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        row.as_ref().map(Self::row_to_todo).transpose()
    }

    async fn list(&self, user_id: i64, sort: Option<TodoSort>) -> Result<Vec<Todo>, DomainError> {
        let query = format!(
            r#"
            SELECT {TODO_COLUMNS}
            FROM todos
            WHERE user_id = $1
            {}
            "#,
            Self::order_clause(sort)
        );

        let rows = sqlx::query(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        rows.iter().map(Self::row_to_todo).collect()
    }

    async fn update(&self, user_id: i64, todo: Todo) -> Result<Option<Todo>, DomainError> {
        let query = format!(
            r#"
            UPDATE todos
            SET title = $3, due_date = $4, priority = $5, is_completed = $6,
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {TODO_COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(todo.id)
            .bind(user_id)
            .bind(&todo.title)
            .bind(todo.due_date)
            .bind(todo.priority)
            .bind(todo.is_completed)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        row.as_ref().map(Self::row_to_todo).transpose()
    }

    async fn delete(&self, user_id: i64, todo_id: i64) -> Result<bool, DomainError> {
        let query = "DELETE FROM todos WHERE id = $1 AND user_id = $2";

        let result = sqlx::query(query)
            .bind(todo_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn toggle_complete(
        &self,
        user_id: i64,
        todo_id: i64,
    ) -> Result<Option<Todo>, DomainError> {
        let query = format!(
            r#"
            UPDATE todos
            SET is_completed = NOT is_completed, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {TODO_COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(todo_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        row.as_ref().map(Self::row_to_todo).transpose()
    }
}
