//! Todo entity

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single task owned by one user. Priority is 0 (low), 1 (medium) or
/// 2 (high); the bounds are enforced at the request boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub priority: i32,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Build a not-yet-persisted todo; id and timestamps come from the
    /// store on insert.
    pub fn new(user_id: i64, title: impl Into<String>, due_date: Option<NaiveDate>, priority: i32) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            user_id,
            title: title.into(),
            due_date,
            priority,
            is_completed: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// List ordering accepted by the todos endpoint. Unrecognised values fall
/// back to the default (newest first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoSort {
    DueDateAsc,
    DueDateDesc,
    PriorityDesc,
    CreatedDesc,
}

impl TodoSort {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "due_date_asc" => Some(TodoSort::DueDateAsc),
            "due_date_desc" => Some(TodoSort::DueDateDesc),
            "priority_desc" => Some(TodoSort::PriorityDesc),
            "created_desc" => Some(TodoSort::CreatedDesc),
            _ => None,
        }
    }
}
