use std::sync::Arc;

use tasksense_enrichment::{LookupClient, TodoValidator};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Adapters are constructed once at process start and injected here,
/// so handlers and the orchestrator share the same clients without any
/// hidden globals. Cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: tasksense_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Validation orchestrator (owns the extraction adapter).
    pub validator: Arc<TodoValidator>,
    /// Search adapter, shared with the validator.
    pub lookup: Arc<LookupClient>,
}
