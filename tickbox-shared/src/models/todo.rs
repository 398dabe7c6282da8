/// Todo model and database operations
///
/// A todo belongs to exactly one user. Every read, update, and delete is
/// scoped to the owner at the query level (`WHERE id = .. AND user_id = ..`),
/// so a caller can never observe or mutate another user's items; a missing
/// row and a foreign row are indistinguishable to the caller.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE todo_status AS ENUM ('pending', 'in_progress', 'completed');
///
/// CREATE TABLE todos (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     title VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     status todo_status NOT NULL DEFAULT 'pending',
///     due_date DATE NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Completion status of a todo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "todo_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TodoStatus {
    /// Not started yet
    Pending,

    /// Being worked on
    InProgress,

    /// Done
    Completed,
}

impl Default for TodoStatus {
    fn default() -> Self {
        TodoStatus::Pending
    }
}

/// A to-do item owned by a user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Todo {
    /// Unique todo ID
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// Short title
    pub title: String,

    /// Free-text description
    pub description: String,

    /// Completion status
    pub status: TodoStatus,

    /// Calendar date the item is due
    pub due_date: NaiveDate,

    /// When the item was created
    pub created_at: DateTime<Utc>,

    /// When the item was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new todo
#[derive(Debug, Clone)]
pub struct CreateTodo {
    /// Owning user
    pub user_id: Uuid,

    /// Short title
    pub title: String,

    /// Free-text description
    pub description: String,

    /// Completion status
    pub status: TodoStatus,

    /// Calendar date the item is due
    pub due_date: NaiveDate,
}

/// Replacement fields for an existing todo
///
/// Updates are full replacements: every field is written.
#[derive(Debug, Clone)]
pub struct UpdateTodo {
    /// New title
    pub title: String,

    /// New description
    pub description: String,

    /// New status
    pub status: TodoStatus,

    /// New due date
    pub due_date: NaiveDate,
}

impl Todo {
    /// Creates a new todo owned by `data.user_id`
    pub async fn create(pool: &PgPool, data: CreateTodo) -> Result<Self, sqlx::Error> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            INSERT INTO todos (user_id, title, description, status, due_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, title, description, status, due_date, created_at, updated_at
            "#,
        )
        .bind(data.user_id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.status)
        .bind(data.due_date)
        .fetch_one(pool)
        .await?;

        Ok(todo)
    }

    /// Lists every todo owned by a user
    ///
    /// No ordering guarantee beyond store default.
    pub async fn list_by_owner(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let todos = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, user_id, title, description, status, due_date, created_at, updated_at
            FROM todos
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(todos)
    }

    /// Replaces all fields of a todo, scoped to its owner
    ///
    /// Returns `None` when the todo does not exist or belongs to another
    /// user; the two cases are deliberately indistinguishable.
    pub async fn update_for_owner(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
        data: UpdateTodo,
    ) -> Result<Option<Self>, sqlx::Error> {
        let todo = sqlx::query_as::<_, Todo>(
            r#"
            UPDATE todos
            SET title = $3, description = $4, status = $5, due_date = $6, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, title, description, status, due_date, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.status)
        .bind(data.due_date)
        .fetch_optional(pool)
        .await?;

        Ok(todo)
    }

    /// Permanently deletes a todo, scoped to its owner
    ///
    /// Returns false when the todo does not exist or belongs to another
    /// user.
    pub async fn delete_for_owner(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_default() {
        assert_eq!(TodoStatus::default(), TodoStatus::Pending);
    }

    #[test]
    fn test_status_serde_names() {
        assert_eq!(
            serde_json::to_string(&TodoStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!(
            serde_json::from_str::<TodoStatus>("\"completed\"").unwrap(),
            TodoStatus::Completed
        );
    }

    // Integration tests for database operations are in tickbox-api/tests/
}
