//! Todo DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

use todo_core::domain::entities::todo::Todo;
use todo_core::errors::DomainError;

/// Wire format for due dates.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTodoRequest {
    #[validate(length(min = 1, max = 100, message = "タイトルは1〜100文字で入力してください"))]
    pub title: String,

    /// `YYYY-MM-DD`, omitted for no due date
    #[serde(default)]
    pub due_date: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0, max = 2, message = "優先度は0〜2で指定してください"))]
    pub priority: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateTodoRequest {
    #[validate(length(min = 1, max = 100, message = "タイトルは1〜100文字で入力してください"))]
    pub title: String,

    #[serde(default)]
    pub due_date: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0, max = 2, message = "優先度は0〜2で指定してください"))]
    pub priority: i32,

    #[serde(default)]
    pub is_completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoResponse {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    pub priority: i32,
    pub is_completed: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Todo> for TodoResponse {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id,
            user_id: todo.user_id,
            title: todo.title.clone(),
            due_date: todo.due_date.map(|d| d.format(DUE_DATE_FORMAT).to_string()),
            priority: todo.priority,
            is_completed: todo.is_completed,
            created_at: todo.created_at.to_rfc3339(),
            updated_at: todo.updated_at.to_rfc3339(),
        }
    }
}

/// Query parameters for the list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TodoListQuery {
    #[serde(default)]
    pub sort: Option<String>,
}

/// Flatten `validator` errors into the envelope's per-field detail map.
pub fn to_validation_error(errors: &validator::ValidationErrors) -> DomainError {
    let fields: HashMap<String, String> = errors
        .field_errors()
        .iter()
        .map(|(field, field_errors)| {
            let message = field_errors
                .first()
                .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| format!("{}が不正です", field));
            (field.to_string(), message)
        })
        .collect();
    DomainError::Validation { fields }
}

/// Parse an optional `YYYY-MM-DD` due date; `Err` means the string was
/// present but not a valid date.
pub fn parse_due_date(due_date: Option<&str>) -> Result<Option<NaiveDate>, ()> {
    match due_date {
        None => Ok(None),
        Some("") => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, DUE_DATE_FORMAT)
            .map(Some)
            .map_err(|_| ()),
    }
}
