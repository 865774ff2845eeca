//! Handlers for the `/watched` resource (the persisted watched list).

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use filmlog_core::error::CoreError;
use filmlog_core::movie::Movie;
use filmlog_core::types::DbId;
use filmlog_db::models::watched_movie::NewWatchedMovie;
use filmlog_db::repositories::WatchedMovieRepo;

use crate::error::{AppError, AppResult};
use crate::response::{MovieMutationResponse, WatchedListResponse};
use crate::state::AppState;

/// POST /watched
///
/// Save a movie to the watched list. Upserts on `tmdb_id`: saving a movie
/// that is already on the list overwrites the stored row rather than
/// creating a duplicate.
///
/// The body is taken as raw JSON so that a missing `id`/`title` is the
/// documented 400, not a framework deserialization rejection.
pub async fn add_watched(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<Json<MovieMutationResponse>> {
    let has_id = body.get("id").and_then(|v| v.as_i64()).is_some_and(|id| id != 0);
    let has_title = body
        .get("title")
        .and_then(|v| v.as_str())
        .is_some_and(|t| !t.is_empty());
    if !has_id || !has_title {
        return Err(AppError::BadRequest(
            "Movie ID and title are required".to_string(),
        ));
    }

    let movie: Movie = serde_json::from_value(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid movie payload: {e}")))?;

    tracing::debug!(tmdb_id = movie.id, title = %movie.title, "Saving movie to watched list");

    let saved = WatchedMovieRepo::upsert(&state.pool, &NewWatchedMovie::from(movie)).await?;

    Ok(Json(MovieMutationResponse {
        success: true,
        message: "Movie saved to watched list",
        movie: saved,
    }))
}

/// GET /watched
///
/// Return the whole watched list, most recently saved first.
pub async fn list_watched(
    State(state): State<AppState>,
) -> AppResult<Json<WatchedListResponse>> {
    let movies = WatchedMovieRepo::list(&state.pool).await?;

    Ok(Json(WatchedListResponse {
        success: true,
        movies,
    }))
}

/// Query parameters for `DELETE /watched`.
#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    /// Surrogate id of the row to remove, as a string so malformed input
    /// is a 400 rather than a silent lookup miss.
    pub id: Option<String>,
}

/// DELETE /watched?id=N
///
/// Remove a row by surrogate id. 400 when the id is missing or
/// non-numeric, 404 when no such row exists.
pub async fn remove_watched(
    State(state): State<AppState>,
    Query(params): Query<DeleteQuery>,
) -> AppResult<Json<MovieMutationResponse>> {
    let raw = params
        .id
        .ok_or_else(|| AppError::BadRequest("Movie ID is required".to_string()))?;
    let id: DbId = raw
        .parse()
        .map_err(|_| AppError::BadRequest("Movie ID must be numeric".to_string()))?;

    // Existence check first so an absent row is a 404, distinct from
    // datastore failures.
    if WatchedMovieRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Movie",
            id,
        }));
    }

    let deleted = WatchedMovieRepo::delete(&state.pool, id)
        .await?
        // Deleted between the check and the delete; report it the same way.
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Movie", id }))?;

    Ok(Json(MovieMutationResponse {
        success: true,
        message: "Movie removed from watched list",
        movie: deleted,
    }))
}
