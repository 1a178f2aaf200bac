use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::models::{ChecklistItem, NewTask, Task};

const TASK_COLUMNS: &str = "id, title, task_type, due, created_at";
const ITEM_COLUMNS: &str = "id, task_id, content, checked, created_at";

#[derive(Clone)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        Self::migrate(pool).await
    }

    /// Single-connection in-memory database. Every pooled connection to
    /// `:memory:` would otherwise see its own empty database.
    pub async fn connect_in_memory() -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Self::migrate(pool).await
    }

    async fn migrate(pool: SqlitePool) -> anyhow::Result<Self> {
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Db { pool })
    }

    pub async fn count_upcoming(&self, now: DateTime<Utc>) -> anyhow::Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tasks WHERE due >= ?")
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    pub async fn upcoming_tasks(
        &self,
        now: DateTime<Utc>,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<Task>> {
        let rows = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE due >= ?
             ORDER BY due, id LIMIT ? OFFSET ?"
        ))
        .bind(now)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn count_previous(&self, now: DateTime<Utc>) -> anyhow::Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tasks WHERE due < ?")
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    pub async fn previous_tasks(
        &self,
        now: DateTime<Utc>,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<Task>> {
        let rows = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE due < ?
             ORDER BY due, id LIMIT ? OFFSET ?"
        ))
        .bind(now)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn create_task(&self, task: &NewTask) -> anyhow::Result<i64> {
        let result = sqlx::query("INSERT INTO tasks (title, task_type, due) VALUES (?, ?, ?)")
            .bind(&task.title)
            .bind(&task.task_type)
            .bind(task.due)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn get_task(&self, task_id: i64) -> anyhow::Result<Option<Task>> {
        let row = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?"
        ))
        .bind(task_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Checklist items go with the task through `ON DELETE CASCADE`.
    pub async fn delete_task(&self, task_id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(task_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn checklist_for_task(&self, task_id: i64) -> anyhow::Result<Vec<ChecklistItem>> {
        let rows = sqlx::query_as::<_, ChecklistItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM checklist_items WHERE task_id = ? ORDER BY id"
        ))
        .bind(task_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn create_checklist_item(&self, task_id: i64, content: &str) -> anyhow::Result<i64> {
        let result =
            sqlx::query("INSERT INTO checklist_items (task_id, content, checked) VALUES (?, ?, FALSE)")
                .bind(task_id)
                .bind(content)
                .execute(&self.pool)
                .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn get_checklist_item(
        &self,
        task_id: i64,
        item_id: i64,
    ) -> anyhow::Result<Option<ChecklistItem>> {
        let row = sqlx::query_as::<_, ChecklistItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM checklist_items WHERE id = ? AND task_id = ?"
        ))
        .bind(item_id)
        .bind(task_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn toggle_checklist_item(&self, task_id: i64, item_id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query(
            "UPDATE checklist_items SET checked = NOT checked WHERE id = ? AND task_id = ?",
        )
        .bind(item_id)
        .bind(task_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_checklist_item(&self, task_id: i64, item_id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM checklist_items WHERE id = ? AND task_id = ?")
            .bind(item_id)
            .bind(task_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
