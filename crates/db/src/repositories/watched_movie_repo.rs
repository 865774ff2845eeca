//! Repository for the `watched_movies` table.

use sqlx::PgPool;

use filmlog_core::types::DbId;

use crate::models::watched_movie::{NewWatchedMovie, WatchedMovie};

/// Column list for `watched_movies` queries.
const COLUMNS: &str = "id, tmdb_id, title, overview, release_date, vote_average, \
     poster_path, backdrop_path, genre_ids, adult, original_language, \
     original_title, popularity, video, vote_count, created_at";

/// CRUD operations for the watched list.
pub struct WatchedMovieRepo;

impl WatchedMovieRepo {
    /// Insert a movie, or overwrite the existing row with the same
    /// `tmdb_id` (last write wins, every field replaced). `created_at`
    /// keeps its original value on conflict so re-saving a movie does not
    /// move it in the list.
    pub async fn upsert(
        pool: &PgPool,
        movie: &NewWatchedMovie,
    ) -> Result<WatchedMovie, sqlx::Error> {
        let query = format!(
            "INSERT INTO watched_movies \
                 (tmdb_id, title, overview, release_date, vote_average, \
                  poster_path, backdrop_path, genre_ids, adult, \
                  original_language, original_title, popularity, video, vote_count) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             ON CONFLICT (tmdb_id) DO UPDATE SET \
                 title = EXCLUDED.title, \
                 overview = EXCLUDED.overview, \
                 release_date = EXCLUDED.release_date, \
                 vote_average = EXCLUDED.vote_average, \
                 poster_path = EXCLUDED.poster_path, \
                 backdrop_path = EXCLUDED.backdrop_path, \
                 genre_ids = EXCLUDED.genre_ids, \
                 adult = EXCLUDED.adult, \
                 original_language = EXCLUDED.original_language, \
                 original_title = EXCLUDED.original_title, \
                 popularity = EXCLUDED.popularity, \
                 video = EXCLUDED.video, \
                 vote_count = EXCLUDED.vote_count \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WatchedMovie>(&query)
            .bind(movie.tmdb_id)
            .bind(&movie.title)
            .bind(&movie.overview)
            .bind(movie.release_date)
            .bind(movie.vote_average)
            .bind(&movie.poster_path)
            .bind(&movie.backdrop_path)
            .bind(&movie.genre_ids)
            .bind(movie.adult)
            .bind(&movie.original_language)
            .bind(&movie.original_title)
            .bind(movie.popularity)
            .bind(movie.video)
            .bind(movie.vote_count)
            .fetch_one(pool)
            .await
    }

    /// List the whole watched list, most recently saved first.
    pub async fn list(pool: &PgPool) -> Result<Vec<WatchedMovie>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM watched_movies \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, WatchedMovie>(&query)
            .fetch_all(pool)
            .await
    }

    /// Look up a row by its surrogate id.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<WatchedMovie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM watched_movies WHERE id = $1");
        sqlx::query_as::<_, WatchedMovie>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a row by surrogate id, returning it if it existed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<WatchedMovie>, sqlx::Error> {
        let query = format!("DELETE FROM watched_movies WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, WatchedMovie>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
