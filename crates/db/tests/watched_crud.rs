//! Round-trip tests for [`WatchedMovieRepo`] against a real Postgres
//! database (provisioned per-test by `#[sqlx::test]`).

use sqlx::PgPool;

use filmlog_db::models::watched_movie::NewWatchedMovie;
use filmlog_db::repositories::WatchedMovieRepo;

fn payload(tmdb_id: i64, title: &str) -> NewWatchedMovie {
    NewWatchedMovie {
        tmdb_id,
        title: title.to_string(),
        overview: Some("overview".to_string()),
        release_date: None,
        vote_average: Some(8.4),
        poster_path: None,
        backdrop_path: None,
        genre_ids: Some(vec![18, 53]),
        adult: false,
        original_language: Some("en".to_string()),
        original_title: Some(title.to_string()),
        popularity: Some(61.4),
        video: false,
        vote_count: Some(26280),
    }
}

// ---------------------------------------------------------------------------
// Test: add then list yields one row with the provider id
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn upsert_then_list_round_trip(pool: PgPool) {
    let saved = WatchedMovieRepo::upsert(&pool, &payload(550, "Fight Club"))
        .await
        .unwrap();
    assert_eq!(saved.tmdb_id, 550);
    assert!(saved.id > 0, "surrogate id must be assigned by the store");

    let movies = WatchedMovieRepo::list(&pool).await.unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].tmdb_id, 550);
    assert_eq!(movies[0].title, "Fight Club");
    assert_eq!(movies[0].genre_ids, Some(vec![18, 53]));
}

// ---------------------------------------------------------------------------
// Test: same tmdb_id updates in place (no duplicate row)
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn upsert_same_tmdb_id_updates_in_place(pool: PgPool) {
    let first = WatchedMovieRepo::upsert(&pool, &payload(550, "Fight Club"))
        .await
        .unwrap();

    let mut again = payload(550, "Fight Club (Director's Cut)");
    again.vote_count = Some(30000);
    let second = WatchedMovieRepo::upsert(&pool, &again).await.unwrap();

    // Last write wins on every descriptive field, but the row identity and
    // its creation timestamp survive.
    assert_eq!(second.id, first.id);
    assert_eq!(second.created_at, first.created_at);
    assert_eq!(second.title, "Fight Club (Director's Cut)");
    assert_eq!(second.vote_count, Some(30000));

    let movies = WatchedMovieRepo::list(&pool).await.unwrap();
    assert_eq!(movies.len(), 1, "upsert must not create a duplicate");
}

// ---------------------------------------------------------------------------
// Test: list orders most recently saved first
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_orders_most_recent_first(pool: PgPool) {
    WatchedMovieRepo::upsert(&pool, &payload(550, "Fight Club"))
        .await
        .unwrap();
    WatchedMovieRepo::upsert(&pool, &payload(603, "The Matrix"))
        .await
        .unwrap();

    let movies = WatchedMovieRepo::list(&pool).await.unwrap();
    let ids: Vec<i64> = movies.iter().map(|m| m.tmdb_id).collect();
    assert_eq!(ids, vec![603, 550]);
}

// ---------------------------------------------------------------------------
// Test: delete returns the removed row; a second list no longer has it
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_removes_exactly_that_row(pool: PgPool) {
    let keep = WatchedMovieRepo::upsert(&pool, &payload(550, "Fight Club"))
        .await
        .unwrap();
    let gone = WatchedMovieRepo::upsert(&pool, &payload(603, "The Matrix"))
        .await
        .unwrap();

    let deleted = WatchedMovieRepo::delete(&pool, gone.id).await.unwrap();
    assert_eq!(deleted.map(|m| m.tmdb_id), Some(603));

    let movies = WatchedMovieRepo::list(&pool).await.unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].id, keep.id);
}

// ---------------------------------------------------------------------------
// Test: delete of an absent surrogate id returns None
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_missing_returns_none(pool: PgPool) {
    let deleted = WatchedMovieRepo::delete(&pool, 9999).await.unwrap();
    assert!(deleted.is_none());
}

// ---------------------------------------------------------------------------
// Test: find_by_id distinguishes present from absent
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn find_by_id_existence_check(pool: PgPool) {
    let saved = WatchedMovieRepo::upsert(&pool, &payload(550, "Fight Club"))
        .await
        .unwrap();

    let found = WatchedMovieRepo::find_by_id(&pool, saved.id).await.unwrap();
    assert_eq!(found.map(|m| m.tmdb_id), Some(550));

    let missing = WatchedMovieRepo::find_by_id(&pool, saved.id + 1).await.unwrap();
    assert!(missing.is_none());
}
