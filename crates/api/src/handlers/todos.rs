//! Handlers for plain todo CRUD.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use tasksense_core::error::CoreError;
use tasksense_core::todo::{validate_category, Category};
use tasksense_core::types::DbId;
use tasksense_db::models::todo::{CreateTodo, Todo, UpdateTodo};
use tasksense_db::repositories::TodoRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query and request types
// ---------------------------------------------------------------------------

/// Query parameters for listing todos.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub category: Option<String>,
}

/// Create request; title and category are required but arrive as
/// options so we can report their absence as 400 rather than 422.
#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

/// Response payload for a delete.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
    pub todo: Todo,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Verify that a todo exists, returning the full row.
pub(crate) async fn ensure_todo_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<Todo> {
    TodoRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Todo", id }))
}

// ---------------------------------------------------------------------------
// GET /todos
// ---------------------------------------------------------------------------

/// List todos, newest first, optionally filtered by category. An
/// unrecognized category filter is ignored rather than rejected.
pub async fn list_todos(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let category = params
        .category
        .as_deref()
        .and_then(|c| c.parse::<Category>().ok());

    let items = TodoRepo::list(&state.pool, category).await?;
    tracing::debug!(count = items.len(), "Listed todos");
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// GET /todos/{id}
// ---------------------------------------------------------------------------

/// Get a single todo by ID.
pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let todo = ensure_todo_exists(&state.pool, id).await?;
    Ok(Json(DataResponse { data: todo }))
}

// ---------------------------------------------------------------------------
// POST /todos
// ---------------------------------------------------------------------------

/// Create a new todo. Title and a valid category are required.
pub async fn create_todo(
    State(state): State<AppState>,
    Json(input): Json<CreateTodoRequest>,
) -> AppResult<impl IntoResponse> {
    let (Some(title), Some(category)) = (&input.title, &input.category) else {
        return Err(AppError::BadRequest(
            "Title and category are required".to_string(),
        ));
    };
    if title.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Title and category are required".to_string(),
        ));
    }
    let category = validate_category(category)?;

    let created = TodoRepo::create(
        &state.pool,
        &CreateTodo {
            title: title.clone(),
            description: input.description.clone(),
            category: category.to_string(),
        },
    )
    .await?;

    tracing::info!(id = created.id, category = %created.category, "Todo created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

// ---------------------------------------------------------------------------
// PUT /todos/{id}
// ---------------------------------------------------------------------------

/// Partially update a todo. Omitted fields retain their previous
/// values; last write wins.
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTodo>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref category) = input.category {
        validate_category(category)?;
    }
    if let Some(ref title) = input.title {
        if title.trim().is_empty() {
            return Err(AppError::BadRequest("Title must not be empty".to_string()));
        }
    }

    let updated = TodoRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Todo", id }))?;

    tracing::info!(id = updated.id, "Todo updated");
    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// DELETE /todos/{id}
// ---------------------------------------------------------------------------

/// Delete a todo, returning the deleted row.
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = TodoRepo::delete(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Todo", id }))?;

    tracing::info!(id = deleted.id, "Todo deleted");
    Ok(Json(DataResponse {
        data: DeleteResponse {
            message: "Todo deleted successfully",
            todo: deleted,
        },
    }))
}
