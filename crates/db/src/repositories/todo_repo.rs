//! Repository for the `todos` table.

use sqlx::PgPool;
use tasksense_core::todo::Category;
use tasksense_core::types::DbId;

use crate::models::todo::{CreateTodo, CreateValidatedTodo, Todo, UpdateTodo};

/// Column list for todos queries.
const COLUMNS: &str = "id, title, description, category, completed, created_at, \
                       original_text, parsed_data, validation_status, business_info, \
                       suggested_alternatives, validation_issues, scheduled_datetime, \
                       location_data";

/// Provides CRUD operations for todos. All statements are parameterized.
pub struct TodoRepo;

impl TodoRepo {
    /// List todos, newest-created-first, optionally filtered by category.
    pub async fn list(pool: &PgPool, category: Option<Category>) -> Result<Vec<Todo>, sqlx::Error> {
        match category {
            Some(category) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM todos WHERE category = $1 ORDER BY created_at DESC"
                );
                sqlx::query_as::<_, Todo>(&query)
                    .bind(category.as_str())
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!("SELECT {COLUMNS} FROM todos ORDER BY created_at DESC");
                sqlx::query_as::<_, Todo>(&query).fetch_all(pool).await
            }
        }
    }

    /// Find a todo by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Todo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM todos WHERE id = $1");
        sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create a plain todo, returning the created row. Description
    /// defaults to the empty string.
    pub async fn create(pool: &PgPool, input: &CreateTodo) -> Result<Todo, sqlx::Error> {
        let query = format!(
            "INSERT INTO todos (title, description, category)
             VALUES ($1, COALESCE($2, ''), $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Todo>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .fetch_one(pool)
            .await
    }

    /// Partial update by ID, returning the updated row. Unset fields
    /// retain their previous values via COALESCE.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTodo,
    ) -> Result<Option<Todo>, sqlx::Error> {
        let query = format!(
            "UPDATE todos SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                completed = COALESCE($5, completed)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(input.completed)
            .fetch_optional(pool)
            .await
    }

    /// Delete a todo by ID, returning the deleted row if it existed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Todo>, sqlx::Error> {
        let query = format!("DELETE FROM todos WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create a todo together with its validation metadata, returning
    /// the created row.
    pub async fn create_validated(
        pool: &PgPool,
        input: &CreateValidatedTodo,
    ) -> Result<Todo, sqlx::Error> {
        let query = format!(
            "INSERT INTO todos (
                title, description, category, original_text, parsed_data,
                validation_status, business_info, suggested_alternatives,
                validation_issues, scheduled_datetime, location_data
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Todo>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.original_text)
            .bind(&input.parsed_data)
            .bind(&input.validation_status)
            .bind(&input.business_info)
            .bind(&input.suggested_alternatives)
            .bind(&input.validation_issues)
            .bind(input.scheduled_datetime)
            .bind(&input.location_data)
            .fetch_one(pool)
            .await
    }
}
