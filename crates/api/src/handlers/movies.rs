//! Handlers for the `/categories/{category}` listing proxy.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use filmlog_core::movie::BrowseCategory;
use filmlog_tmdb::TmdbClient;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Query parameters shared by the proxy endpoints.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    /// 1-based provider page. Defaults to 1.
    pub page: Option<u32>,
}

/// Pull the TMDb client out of state, or report the unset credential.
pub(crate) fn require_tmdb(state: &AppState) -> AppResult<Arc<TmdbClient>> {
    state.tmdb.clone().ok_or(AppError::MissingApiKey)
}

/// GET /categories/{category}
///
/// Forward one page of a provider category listing. The provider's JSON
/// is relayed unchanged; only the HTTP envelope is ours.
pub async fn category_listing(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(params): Query<PageQuery>,
) -> AppResult<Json<serde_json::Value>> {
    // Input validation precedes the credential check so an unknown token
    // is always a 400 regardless of server configuration.
    let category: BrowseCategory = category
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid category".to_string()))?;

    let tmdb = require_tmdb(&state)?;
    let page = params.page.unwrap_or(1);

    let data = tmdb.movie_list(category, page).await?;
    Ok(Json(data))
}
