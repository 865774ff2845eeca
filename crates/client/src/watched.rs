//! Optimistic save/remove widgets for the watched list.
//!
//! Each item carries a small transient state machine layered over the
//! shared store's authoritative list: saves run Idle → Saving → Saved
//! (2 s badge) → Idle, removes run Idle → Removing → (1.5 s after the
//! server confirms) gone from the store. While a request is in flight the
//! control reports itself disabled.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use filmlog_core::movie::Movie;
use filmlog_core::types::DbId;
use filmlog_db::models::watched_movie::WatchedMovie;

use crate::api::ClientError;
use crate::state::{Action, Store};

/// How long the "saved" badge shows after a successful save.
pub const SAVED_BADGE_DURATION: Duration = Duration::from_secs(2);

/// How long a removed item lingers (with feedback) before it leaves the list.
pub const REMOVAL_LINGER: Duration = Duration::from_millis(1500);

/// The persistence seam the controller is generic over.
#[async_trait]
pub trait WatchedBackend: Send + Sync + 'static {
    async fn add_watched(&self, movie: &Movie) -> Result<WatchedMovie, ClientError>;
    async fn list_watched(&self) -> Result<Vec<WatchedMovie>, ClientError>;
    async fn remove_watched(&self, id: DbId) -> Result<WatchedMovie, ClientError>;
}

/// What a save control should show for one movie.
///
/// Read precedence is `Saved > Saving > AlreadyWatched > Idle`: local
/// transient feedback wins over the shared store's view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveDisplay {
    /// Just saved; showing the confirmation badge.
    Saved,
    /// Request in flight.
    Saving,
    /// The shared store already has this movie.
    AlreadyWatched,
    /// Free to save.
    Idle,
}

/// Drives the save/remove controls against the shared store. Cheap to
/// clone; clones share the same transient sets.
pub struct WatchedController<B: WatchedBackend> {
    inner: Arc<Inner<B>>,
}

impl<B: WatchedBackend> Clone for WatchedController<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct Inner<B> {
    store: Arc<Store>,
    backend: Arc<B>,
    /// tmdb ids with a save in flight.
    saving: Mutex<HashSet<i64>>,
    /// tmdb ids showing the post-save badge.
    saved: Mutex<HashSet<i64>>,
    /// Surrogate ids with a remove in flight or lingering.
    removing: Mutex<HashSet<DbId>>,
}

impl<B: WatchedBackend> WatchedController<B> {
    pub fn new(store: Arc<Store>, backend: Arc<B>) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                backend,
                saving: Mutex::new(HashSet::new()),
                saved: Mutex::new(HashSet::new()),
                removing: Mutex::new(HashSet::new()),
            }),
        }
    }

    /// Current display state for a movie's save control.
    pub fn save_display(&self, tmdb_id: i64) -> SaveDisplay {
        if self.inner.saved.lock().expect("lock poisoned").contains(&tmdb_id) {
            return SaveDisplay::Saved;
        }
        if self.inner.saving.lock().expect("lock poisoned").contains(&tmdb_id) {
            return SaveDisplay::Saving;
        }
        let in_store = self
            .inner
            .store
            .read(|s| s.watched_movies.iter().any(|m| m.tmdb_id == tmdb_id));
        if in_store {
            return SaveDisplay::AlreadyWatched;
        }
        SaveDisplay::Idle
    }

    /// The save control accepts clicks only when idle.
    pub fn is_save_disabled(&self, tmdb_id: i64) -> bool {
        self.save_display(tmdb_id) != SaveDisplay::Idle
    }

    /// Whether a list item is mid-removal (in flight or lingering).
    pub fn is_removing(&self, id: DbId) -> bool {
        self.inner.removing.lock().expect("lock poisoned").contains(&id)
    }

    /// Save a movie to the watched list.
    ///
    /// No-op when the control is not idle (in flight, just saved, or the
    /// movie is already on the list). On success the stored row is
    /// prepended to the shared list and the badge is scheduled to clear.
    pub async fn save(&self, movie: Movie) -> Result<(), ClientError> {
        if self.save_display(movie.id) != SaveDisplay::Idle {
            return Ok(());
        }

        let tmdb_id = movie.id;
        self.inner.saving.lock().expect("lock poisoned").insert(tmdb_id);

        let result = self.inner.backend.add_watched(&movie).await;
        self.inner.saving.lock().expect("lock poisoned").remove(&tmdb_id);

        match result {
            Ok(row) => {
                tracing::debug!(tmdb_id, title = %row.title, "Movie saved to watched list");
                self.inner.store.dispatch(Action::AddWatchedMovie(row));
                self.inner.saved.lock().expect("lock poisoned").insert(tmdb_id);

                let inner = Arc::clone(&self.inner);
                tokio::spawn(async move {
                    tokio::time::sleep(SAVED_BADGE_DURATION).await;
                    inner.saved.lock().expect("lock poisoned").remove(&tmdb_id);
                });
                Ok(())
            }
            Err(err) => {
                // Revert to idle; the error is logged, not toasted.
                tracing::error!(error = %err, tmdb_id, "Saving movie failed");
                Err(err)
            }
        }
    }

    /// Remove a watched row by surrogate id.
    ///
    /// The item keeps rendering (flagged as removing) for
    /// [`REMOVAL_LINGER`] after the server confirms, then leaves the
    /// shared list. On failure the item reverts to idle.
    pub async fn remove(&self, id: DbId) -> Result<(), ClientError> {
        {
            let mut removing = self.inner.removing.lock().expect("lock poisoned");
            if !removing.insert(id) {
                return Ok(());
            }
        }

        match self.inner.backend.remove_watched(id).await {
            Ok(row) => {
                tracing::debug!(id, title = %row.title, "Movie removed from watched list");
                let inner = Arc::clone(&self.inner);
                tokio::spawn(async move {
                    tokio::time::sleep(REMOVAL_LINGER).await;
                    inner.store.dispatch(Action::RemoveWatchedMovie(id));
                    inner.removing.lock().expect("lock poisoned").remove(&id);
                });
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err, id, "Removing movie failed");
                self.inner.removing.lock().expect("lock poisoned").remove(&id);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn movie(id: i64, title: &str) -> Movie {
        serde_json::from_value(serde_json::json!({ "id": id, "title": title })).unwrap()
    }

    fn row(id: DbId, tmdb_id: i64, title: &str) -> WatchedMovie {
        WatchedMovie {
            id,
            tmdb_id,
            title: title.to_string(),
            overview: None,
            release_date: None,
            vote_average: None,
            poster_path: None,
            backdrop_path: None,
            genre_ids: None,
            adult: false,
            original_language: None,
            original_title: None,
            popularity: None,
            video: false,
            vote_count: None,
            created_at: Utc::now(),
        }
    }

    /// Stub backend that succeeds (or fails) and counts calls.
    #[derive(Default)]
    struct StubBackend {
        adds: AtomicUsize,
        removes: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl WatchedBackend for StubBackend {
        async fn add_watched(&self, movie: &Movie) -> Result<WatchedMovie, ClientError> {
            self.adds.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ClientError::Api {
                    status: 500,
                    message: "Database error".into(),
                });
            }
            Ok(row(1, movie.id, &movie.title))
        }

        async fn list_watched(&self) -> Result<Vec<WatchedMovie>, ClientError> {
            Ok(vec![])
        }

        async fn remove_watched(&self, id: DbId) -> Result<WatchedMovie, ClientError> {
            self.removes.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ClientError::Api {
                    status: 404,
                    message: "Movie not found in watched list".into(),
                });
            }
            Ok(row(id, 550, "Fight Club"))
        }
    }

    fn setup(
        backend: StubBackend,
    ) -> (
        WatchedController<StubBackend>,
        Arc<Store>,
        Arc<StubBackend>,
    ) {
        let store = Arc::new(Store::new());
        let backend = Arc::new(backend);
        let controller = WatchedController::new(Arc::clone(&store), Arc::clone(&backend));
        (controller, store, backend)
    }

    #[tokio::test(start_paused = true)]
    async fn save_prepends_and_badge_clears_after_two_seconds() {
        let (watched, store, _backend) = setup(StubBackend::default());

        watched.save(movie(550, "Fight Club")).await.unwrap();

        assert_eq!(store.read(|s| s.watched_movies.len()), 1);
        assert_matches!(watched.save_display(550), SaveDisplay::Saved);
        assert!(watched.is_save_disabled(550));

        tokio::time::sleep(SAVED_BADGE_DURATION + Duration::from_millis(50)).await;
        tokio::task::yield_now().await;

        // Badge gone; the movie is now reported from the shared store.
        assert_matches!(watched.save_display(550), SaveDisplay::AlreadyWatched);
    }

    #[tokio::test(start_paused = true)]
    async fn save_failure_reverts_to_idle() {
        let (watched, store, _backend) = setup(StubBackend {
            fail: true,
            ..Default::default()
        });

        let result = watched.save(movie(550, "Fight Club")).await;
        assert!(result.is_err());
        assert_eq!(store.read(|s| s.watched_movies.len()), 0);
        assert_matches!(watched.save_display(550), SaveDisplay::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn saving_again_while_already_watched_is_a_no_op() {
        let (watched, _store, backend) = setup(StubBackend::default());

        watched.save(movie(550, "Fight Club")).await.unwrap();
        tokio::time::sleep(SAVED_BADGE_DURATION + Duration::from_millis(50)).await;
        tokio::task::yield_now().await;

        // Already in the store: the control is disabled, save is a no-op.
        watched.save(movie(550, "Fight Club")).await.unwrap();
        assert_eq!(backend.adds.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn remove_lingers_then_leaves_the_store() {
        let (watched, store, _backend) = setup(StubBackend::default());
        store.dispatch(Action::SetWatchedMovies(vec![row(7, 550, "Fight Club")]));

        watched.remove(7).await.unwrap();

        // Confirmed by the server but still lingering in the list.
        assert!(watched.is_removing(7));
        assert_eq!(store.read(|s| s.watched_movies.len()), 1);

        tokio::time::sleep(REMOVAL_LINGER + Duration::from_millis(50)).await;
        tokio::task::yield_now().await;

        assert!(!watched.is_removing(7));
        assert_eq!(store.read(|s| s.watched_movies.len()), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn remove_failure_reverts_to_idle() {
        let (watched, store, _backend) = setup(StubBackend {
            fail: true,
            ..Default::default()
        });
        store.dispatch(Action::SetWatchedMovies(vec![row(7, 550, "Fight Club")]));

        let result = watched.remove(7).await;
        assert!(result.is_err());
        assert!(!watched.is_removing(7));
        assert_eq!(store.read(|s| s.watched_movies.len()), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_remove_for_same_id_hits_backend_once() {
        let (watched, store, backend) = setup(StubBackend::default());
        store.dispatch(Action::SetWatchedMovies(vec![row(7, 550, "Fight Club")]));

        let (a, b) = tokio::join!(watched.remove(7), watched.remove(7));
        a.unwrap();
        b.unwrap();

        assert_eq!(backend.removes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn display_precedence_prefers_local_feedback() {
        let (watched, store, _backend) = setup(StubBackend::default());

        // In the store AND showing the saved badge: badge wins.
        store.dispatch(Action::SetWatchedMovies(vec![row(1, 550, "Fight Club")]));
        watched.inner.saved.lock().unwrap().insert(550);
        assert_matches!(watched.save_display(550), SaveDisplay::Saved);

        // Saving (no badge) beats already-in-store.
        watched.inner.saved.lock().unwrap().clear();
        watched.inner.saving.lock().unwrap().insert(550);
        assert_matches!(watched.save_display(550), SaveDisplay::Saving);

        watched.inner.saving.lock().unwrap().clear();
        assert_matches!(watched.save_display(550), SaveDisplay::AlreadyWatched);
    }
}
