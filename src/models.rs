use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub task_type: String,
    pub due: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChecklistItem {
    pub id: i64,
    pub task_id: i64,
    pub content: String,
    pub checked: bool,
    pub created_at: DateTime<Utc>,
}

/// A task that passed form validation and is ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub task_type: String,
    pub due: DateTime<Utc>,
}
