//! Route definitions for the todos surface.
//!
//! ```text
//! GET    /                    list_todos
//! POST   /                    create_todo
//! POST   /validate            validate_text
//! POST   /create              create_with_validation
//! GET    /suggestions/{id}    suggestions_for_todo
//! GET    /{id}                get_todo
//! PUT    /{id}                update_todo
//! DELETE /{id}                delete_todo
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{todos, validation};
use crate::state::AppState;

/// Todo routes -- mounted at `/todos`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(todos::list_todos).post(todos::create_todo))
        .route("/validate", post(validation::validate_text))
        .route("/create", post(validation::create_with_validation))
        .route("/suggestions/{id}", get(validation::suggestions_for_todo))
        .route(
            "/{id}",
            get(todos::get_todo)
                .put(todos::update_todo)
                .delete(todos::delete_todo),
        )
}
