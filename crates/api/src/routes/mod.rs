//! Route registration for the API.

use axum::Router;

use crate::state::AppState;

pub mod health;
pub mod search;
pub mod todos;

/// All routes mounted under `/api`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/todos", todos::router())
        .nest("/search", search::router())
}
