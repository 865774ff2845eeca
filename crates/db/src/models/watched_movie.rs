//! Watched-movie entity model and insert payload.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use filmlog_core::movie::Movie;
use filmlog_core::types::{DbId, Timestamp};

/// A row from the `watched_movies` table.
///
/// `id` is the surrogate primary key; `tmdb_id` is the provider's movie
/// identifier and carries a unique constraint (at most one row per movie).
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct WatchedMovie {
    pub id: DbId,
    pub tmdb_id: i64,
    pub title: String,
    pub overview: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub vote_average: Option<f64>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub genre_ids: Option<Vec<i32>>,
    pub adult: bool,
    pub original_language: Option<String>,
    pub original_title: Option<String>,
    pub popularity: Option<f64>,
    pub video: bool,
    pub vote_count: Option<i64>,
    pub created_at: Timestamp,
}

/// Insert payload for `watched_movies`, derived from a provider [`Movie`].
///
/// The provider pads absent text fields with empty strings; those become
/// SQL NULL here, as does a release date that fails to parse as
/// `YYYY-MM-DD`. No other validation happens at this layer.
#[derive(Debug, Clone)]
pub struct NewWatchedMovie {
    pub tmdb_id: i64,
    pub title: String,
    pub overview: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub vote_average: Option<f64>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub genre_ids: Option<Vec<i32>>,
    pub adult: bool,
    pub original_language: Option<String>,
    pub original_title: Option<String>,
    pub popularity: Option<f64>,
    pub video: bool,
    pub vote_count: Option<i64>,
}

/// Empty provider strings are "absent".
fn coalesce(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

impl From<Movie> for NewWatchedMovie {
    fn from(movie: Movie) -> Self {
        let release_date = movie
            .release_date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());

        NewWatchedMovie {
            tmdb_id: movie.id,
            title: movie.title,
            overview: coalesce(movie.overview),
            release_date,
            vote_average: movie.vote_average,
            poster_path: coalesce(movie.poster_path),
            backdrop_path: coalesce(movie.backdrop_path),
            genre_ids: movie.genre_ids,
            adult: movie.adult,
            original_language: coalesce(movie.original_language),
            original_title: coalesce(movie.original_title),
            popularity: movie.popularity,
            video: movie.video,
            vote_count: movie.vote_count,
        }
    }
}
