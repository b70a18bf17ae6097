//! Todo row model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use tasksense_core::enrichment::{BusinessInfo, LocationData, ParsedData};
use tasksense_core::types::{DbId, Timestamp};
use tasksense_core::validation::ValidationIssue;

/// A row from the `todos` table.
///
/// `category` and `validation_status` are stored as TEXT; the CHECK
/// constraints plus `tasksense_core` validation keep them inside their
/// respective enums.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Todo {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub completed: bool,
    pub created_at: Timestamp,
    pub original_text: Option<String>,
    pub parsed_data: Option<Json<ParsedData>>,
    pub validation_status: String,
    pub business_info: Option<Json<BusinessInfo>>,
    pub suggested_alternatives: Option<Json<serde_json::Value>>,
    pub validation_issues: Option<Json<Vec<ValidationIssue>>>,
    pub scheduled_datetime: Option<Timestamp>,
    pub location_data: Option<Json<LocationData>>,
}

/// DTO for creating a plain todo (no enrichment).
#[derive(Debug, Deserialize)]
pub struct CreateTodo {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
}

/// DTO for a partial update. Omitted fields retain their previous
/// values (last write wins; no read-modify-write protection).
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub completed: Option<bool>,
}

/// DTO for creating a todo together with its validation metadata.
#[derive(Debug)]
pub struct CreateValidatedTodo {
    pub title: String,
    pub description: String,
    pub category: String,
    pub original_text: Option<String>,
    pub parsed_data: Option<Json<ParsedData>>,
    pub validation_status: String,
    pub business_info: Option<Json<BusinessInfo>>,
    pub suggested_alternatives: Option<Json<serde_json::Value>>,
    pub validation_issues: Option<Json<Vec<ValidationIssue>>>,
    pub scheduled_datetime: Option<Timestamp>,
    pub location_data: Option<Json<LocationData>>,
}
