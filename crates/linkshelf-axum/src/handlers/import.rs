//! Import handlers - pull a workspace database into its cache file.

use axum::Json;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::HttpError;
use crate::state::AppState;

/// Query string of `GET /api/fetch-and-cache`.
#[derive(Debug, Deserialize)]
pub struct FetchAndCacheQuery {
    /// Catalog key, e.g. `llm_links`.
    #[serde(rename = "type")]
    pub catalog: Option<String>,
}

/// Success body.
#[derive(Debug, Serialize)]
pub struct FetchAndCacheResponse {
    pub message: String,
}

/// Fetch every row of the catalog's database and overwrite its cache file.
pub async fn fetch_and_cache(
    State(state): State<AppState>,
    Query(query): Query<FetchAndCacheQuery>,
) -> Result<Json<FetchAndCacheResponse>, HttpError> {
    let catalog = query.catalog.as_deref();
    info!(catalog = ?catalog, "fetch-and-cache requested");

    let summary = state.import.run(catalog).await?;
    Ok(Json(FetchAndCacheResponse {
        message: summary.message(),
    }))
}
