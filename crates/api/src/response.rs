//! Shared response envelope types for API handlers.
//!
//! The watched-list endpoints answer with `{success, ...}` envelopes. Use
//! these instead of ad-hoc `serde_json::json!` so the shapes stay
//! consistent across handlers.

use serde::Serialize;

use filmlog_db::models::watched_movie::WatchedMovie;

/// Envelope for add/remove: `{ success, message, movie }`.
#[derive(Debug, Serialize)]
pub struct MovieMutationResponse {
    pub success: bool,
    pub message: &'static str,
    pub movie: WatchedMovie,
}

/// Envelope for listing: `{ success, movies }`.
#[derive(Debug, Serialize)]
pub struct WatchedListResponse {
    pub success: bool,
    pub movies: Vec<WatchedMovie>,
}
