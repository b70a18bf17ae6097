//! Handler for the nearby-business search endpoint.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Hard cap on results per search.
const MAX_RESULTS: usize = 10;

/// Query parameters for the nearby-business search.
#[derive(Debug, Deserialize)]
pub struct BusinessSearchParams {
    #[serde(rename = "type")]
    pub business_type: Option<String>,
    pub location: Option<String>,
    pub limit: Option<usize>,
}

// ---------------------------------------------------------------------------
// GET /search/businesses
// ---------------------------------------------------------------------------

/// Search nearby businesses by type and location. Best-effort: an
/// unconfigured or failing search adapter yields an empty result list.
pub async fn nearby_businesses(
    State(state): State<AppState>,
    Query(params): Query<BusinessSearchParams>,
) -> AppResult<impl IntoResponse> {
    let (Some(business_type), Some(location)) = (&params.business_type, &params.location) else {
        return Err(AppError::BadRequest(
            "Both type and location parameters are required".to_string(),
        ));
    };

    // A zero limit is treated as unset, not as "no results".
    let limit = params
        .limit
        .filter(|&l| l > 0)
        .unwrap_or(5)
        .min(MAX_RESULTS);

    let results = state
        .lookup
        .search_nearby_businesses(business_type, location, limit)
        .await;
    tracing::debug!(count = results.len(), "Nearby-business search completed");

    Ok(Json(DataResponse {
        data: json!({
            "query": {
                "type": business_type,
                "location": location,
                "limit": limit,
            },
            "results": results,
        }),
    }))
}
