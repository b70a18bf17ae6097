//! Handlers for the smart validation surface: validate free text,
//! create a todo from validated text, and fetch alternatives for a
//! stored todo.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use sqlx::types::Json as DbJson;

use tasksense_core::todo::Category;
use tasksense_core::types::DbId;
use tasksense_core::validation::ValidationResult;
use tasksense_db::models::todo::CreateValidatedTodo;
use tasksense_db::repositories::TodoRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::todos::ensure_todo_exists;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateWithValidationRequest {
    pub text: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

// ---------------------------------------------------------------------------
// POST /todos/validate
// ---------------------------------------------------------------------------

/// Run the validation pipeline over free text without persisting
/// anything. A propagated extraction transport failure surfaces as an
/// upstream error with no partial result.
pub async fn validate_text(
    State(state): State<AppState>,
    Json(input): Json<ValidateRequest>,
) -> AppResult<impl IntoResponse> {
    let text = input
        .text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            AppError::BadRequest("Text is required and must be a non-empty string".to_string())
        })?;

    let result = state.validator.validate(text).await?;
    Ok(Json(DataResponse { data: result }))
}

// ---------------------------------------------------------------------------
// POST /todos/create
// ---------------------------------------------------------------------------

/// Create a todo from free text and/or explicit fields, persisting the
/// validation metadata alongside.
///
/// Field defaulting mirrors the validation pipeline: a missing title
/// falls back to the parsed task, a missing description records the
/// source text, and the parsed category takes precedence over the
/// explicit one. An unusable category silently coerces to Personal
/// rather than failing the create.
pub async fn create_with_validation(
    State(state): State<AppState>,
    Json(input): Json<CreateWithValidationRequest>,
) -> AppResult<impl IntoResponse> {
    let text = input
        .text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());

    let validation: Option<ValidationResult> = match text {
        Some(text) => Some(state.validator.validate(text).await?),
        None => None,
    };

    let mut title = input.title.clone().filter(|t| !t.trim().is_empty());
    let mut description = input.description.clone();
    let mut category = input.category.clone();

    if let (Some(text), Some(validation)) = (text, &validation) {
        if title.is_none() {
            title = validation.parsed_data.task.clone();
        }
        if description.is_none() {
            description = Some(format!("Parsed from: \"{text}\""));
        }
        if let Some(parsed_category) = &validation.parsed_data.category {
            category = Some(parsed_category.clone());
        }
    }

    let Some(title) = title else {
        return Err(AppError::BadRequest(
            "Title is required (either directly or through text parsing)".to_string(),
        ));
    };

    let category = category
        .as_deref()
        .and_then(|c| c.parse::<Category>().ok())
        .unwrap_or(Category::Personal);

    let row = CreateValidatedTodo {
        title,
        description: description.unwrap_or_default(),
        category: category.to_string(),
        original_text: validation
            .as_ref()
            .map(|v| v.original_text.clone())
            .or_else(|| text.map(String::from)),
        parsed_data: validation.as_ref().map(|v| DbJson(v.parsed_data.clone())),
        validation_status: validation
            .as_ref()
            .map(|v| v.validation_status.as_str().to_string())
            .unwrap_or_else(|| "pending".to_string()),
        business_info: validation
            .as_ref()
            .and_then(|v| v.business_info.clone())
            .map(DbJson),
        suggested_alternatives: validation
            .as_ref()
            .and_then(|v| v.suggested_alternatives.clone())
            .map(DbJson),
        validation_issues: validation
            .as_ref()
            .map(|v| DbJson(v.validation_issues.clone())),
        scheduled_datetime: validation.as_ref().and_then(|v| v.scheduled_datetime),
        location_data: validation.as_ref().map(|v| DbJson(v.location_data.clone())),
    };

    let todo = TodoRepo::create_validated(&state.pool, &row).await?;
    tracing::info!(
        id = todo.id,
        status = %todo.validation_status,
        "Validated todo created"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: json!({
                "todo": todo,
                "validation": validation,
            }),
        }),
    ))
}

// ---------------------------------------------------------------------------
// GET /todos/suggestions/{id}
// ---------------------------------------------------------------------------

/// Fetch alternative suggestions for a stored todo. Todos created
/// without enrichment metadata get an empty list, not an error.
pub async fn suggestions_for_todo(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let todo = ensure_todo_exists(&state.pool, id).await?;

    let (Some(parsed_data), Some(business_info)) = (&todo.parsed_data, &todo.business_info) else {
        return Ok(Json(DataResponse {
            data: json!({
                "suggestions": [],
                "message": "No additional suggestions available for this todo",
            }),
        }));
    };

    let issues = todo
        .validation_issues
        .as_ref()
        .map(|issues| issues.0.clone())
        .unwrap_or_default();

    let alternatives = state
        .validator
        .generate_alternatives(&parsed_data.0, Some(&business_info.0), &issues)
        .await;

    Ok(Json(DataResponse {
        data: json!({
            "todo_id": id,
            "suggestions": alternatives,
            "current_status": todo.validation_status,
        }),
    }))
}
