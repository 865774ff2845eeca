//! Handler for the `/search` proxy.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::movies::require_tmdb;
use crate::state::AppState;

/// Query parameters for `GET /search`.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Free-text query. Required; an empty string is still forwarded.
    pub query: Option<String>,
    /// 1-based provider page. Defaults to 1.
    pub page: Option<u32>,
}

/// GET /search?query=Q&page=N
///
/// Forward a movie search to the provider and relay its JSON unchanged.
pub async fn search_movies(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let query = params
        .query
        .ok_or_else(|| AppError::BadRequest("Query parameter is required".to_string()))?;

    let tmdb = require_tmdb(&state)?;
    let page = params.page.unwrap_or(1);

    let data = tmdb.search_movies(&query, page).await?;
    Ok(Json(data))
}
