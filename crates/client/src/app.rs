//! Composition root for a session.
//!
//! Owns the single [`Store`] and wires the controllers to one backend.
//! Also the home of the two session-level behaviours: the one-shot
//! watched-list bootstrap and the single owned escape handler.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::api::ApiClient;
use crate::browse::{BrowseBackend, BrowseController};
use crate::search::{SearchBackend, SearchController};
use crate::state::{Action, Store};
use crate::watched::{WatchedBackend, WatchedController};

/// One running session: the store plus its controllers.
pub struct App<B>
where
    B: SearchBackend + BrowseBackend + WatchedBackend,
{
    store: Arc<Store>,
    backend: Arc<B>,
    pub search: SearchController<B>,
    pub browse: BrowseController<B>,
    pub watched: WatchedController<B>,
    bootstrapped: AtomicBool,
}

impl App<ApiClient> {
    /// Connect to a filmlog server, e.g. `http://localhost:3000`.
    pub fn connect(base_url: impl Into<String>) -> Self {
        Self::new(ApiClient::new(base_url.into()))
    }
}

impl<B> App<B>
where
    B: SearchBackend + BrowseBackend + WatchedBackend,
{
    pub fn new(backend: B) -> Self {
        let store = Arc::new(Store::new());
        let backend = Arc::new(backend);
        Self {
            search: SearchController::new(Arc::clone(&store), Arc::clone(&backend)),
            browse: BrowseController::new(Arc::clone(&store), Arc::clone(&backend)),
            watched: WatchedController::new(Arc::clone(&store), Arc::clone(&backend)),
            store,
            backend,
            bootstrapped: AtomicBool::new(false),
        }
    }

    /// The shared state store (read-only for views; mutation goes through
    /// the controllers).
    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    /// Populate the watched list, once.
    ///
    /// Guarded three ways, matching the initial-load semantics: a one-shot
    /// flag on the app, the store's loading flag, and a non-empty list all
    /// make this a no-op.
    pub async fn bootstrap(&self) {
        if self.bootstrapped.swap(true, Ordering::SeqCst) {
            return;
        }
        let already = self
            .store
            .read(|s| !s.watched_movies.is_empty() || s.is_loading_watched);
        if already {
            return;
        }

        self.store.dispatch(Action::SetLoadingWatched(true));
        match self.backend.list_watched().await {
            Ok(movies) => {
                tracing::debug!(count = movies.len(), "Loaded watched list");
                // Also clears the loading flag.
                self.store.dispatch(Action::SetWatchedMovies(movies));
            }
            Err(err) => {
                tracing::error!(error = %err, "Loading watched list failed");
                self.store.dispatch(Action::SetLoadingWatched(false));
            }
        }
    }

    /// The single owned Escape handler for the whole session: clears the
    /// active search, hides its results, and resets the has-searched
    /// state. Views never register their own listeners.
    pub fn handle_escape(&self) {
        self.search.escape();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::atomic::AtomicUsize;

    use filmlog_core::movie::{BrowseCategory, Movie};
    use filmlog_core::types::DbId;
    use filmlog_db::models::watched_movie::WatchedMovie;

    use crate::api::ClientError;

    #[derive(Default)]
    struct StubBackend {
        lists: AtomicUsize,
        fail_list: bool,
    }

    fn row(id: DbId, tmdb_id: i64) -> WatchedMovie {
        WatchedMovie {
            id,
            tmdb_id,
            title: format!("movie-{tmdb_id}"),
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

    #[async_trait]
    impl SearchBackend for StubBackend {
        async fn search(&self, _query: &str, _page: u32) -> Result<Vec<Movie>, ClientError> {
            Ok(vec![])
        }
    }

    #[async_trait]
    impl BrowseBackend for StubBackend {
        async fn category_listing(
            &self,
            _category: BrowseCategory,
            _page: u32,
        ) -> Result<Vec<Movie>, ClientError> {
            Ok(vec![])
        }
    }

    #[async_trait]
    impl WatchedBackend for StubBackend {
        async fn add_watched(&self, _movie: &Movie) -> Result<WatchedMovie, ClientError> {
            unimplemented!("not exercised here")
        }

        async fn list_watched(&self) -> Result<Vec<WatchedMovie>, ClientError> {
            self.lists.fetch_add(1, Ordering::SeqCst);
            if self.fail_list {
                return Err(ClientError::Api {
                    status: 500,
                    message: "Database error".into(),
                });
            }
            Ok(vec![row(1, 550), row(2, 603)])
        }

        async fn remove_watched(&self, _id: DbId) -> Result<WatchedMovie, ClientError> {
            unimplemented!("not exercised here")
        }
    }

    #[tokio::test]
    async fn bootstrap_populates_watched_list_once() {
        let app = App::new(StubBackend::default());

        app.bootstrap().await;
        app.bootstrap().await;

        assert_eq!(app.backend.lists.load(Ordering::SeqCst), 1);
        let ids: Vec<DbId> = app.store().read(|s| s.watched_movies.iter().map(|m| m.id).collect());
        assert_eq!(ids, vec![1, 2]);
        assert!(!app.store().read(|s| s.is_loading_watched));
    }

    #[tokio::test]
    async fn failed_bootstrap_clears_loading_flag() {
        let app = App::new(StubBackend {
            fail_list: true,
            ..Default::default()
        });

        app.bootstrap().await;

        assert!(app.store().read(|s| s.watched_movies.is_empty()));
        assert!(!app.store().read(|s| s.is_loading_watched));
    }

    #[tokio::test(start_paused = true)]
    async fn escape_clears_the_active_search() {
        let app = App::new(StubBackend::default());

        let handle = app.search.on_input("fight");
        app.handle_escape();
        handle.await.unwrap();

        assert_eq!(app.search.query(), "");
        assert!(!app.search.has_searched());
    }
}
