//! Route definitions for the business search surface.

use axum::routing::get;
use axum::Router;

use crate::handlers::search;
use crate::state::AppState;

/// Search routes -- mounted at `/search`.
pub fn router() -> Router<AppState> {
    Router::new().route("/businesses", get(search::nearby_businesses))
}
