//! Debounced search-as-you-type.
//!
//! Keystrokes restart a debounce timer; only the query current when the
//! timer fires triggers a fetch, and a hit in the store's search cache
//! bypasses the network entirely. A generation counter doubles as both the
//! debounce cancellation and the stale-result guard: bumping it (new
//! keystroke, escape) invalidates every older timer and in-flight fetch.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use filmlog_core::movie::Movie;

use crate::api::ClientError;
use crate::state::{Action, Store};

/// How long input must quiesce before a fetch fires.
pub const DEBOUNCE: Duration = Duration::from_millis(500);

/// The fetch seam the controller is generic over; implemented for
/// [`crate::api::ApiClient`] and by stubs in tests.
#[async_trait]
pub trait SearchBackend: Send + Sync + 'static {
    async fn search(&self, query: &str, page: u32) -> Result<Vec<Movie>, ClientError>;
}

/// Drives one search box against the shared store. Cheap to clone; clones
/// share the same debounce state.
pub struct SearchController<B: SearchBackend> {
    inner: Arc<Inner<B>>,
}

impl<B: SearchBackend> Clone for SearchController<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct Inner<B> {
    store: Arc<Store>,
    backend: Arc<B>,
    query: Mutex<String>,
    has_searched: AtomicBool,
    generation: AtomicU64,
    debounce: Duration,
}

impl<B: SearchBackend> SearchController<B> {
    pub fn new(store: Arc<Store>, backend: Arc<B>) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                backend,
                query: Mutex::new(String::new()),
                has_searched: AtomicBool::new(false),
                generation: AtomicU64::new(0),
                debounce: DEBOUNCE,
            }),
        }
    }

    /// Record a keystroke and (re)start the debounce timer.
    ///
    /// Returns the scheduled task's handle so tests can await settlement;
    /// production callers drop it.
    pub fn on_input(&self, text: &str) -> tokio::task::JoinHandle<()> {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *self.inner.query.lock().expect("query lock poisoned") = text.to_string();

        let inner = Arc::clone(&self.inner);
        let query = text.to_string();
        tokio::spawn(async move {
            tokio::time::sleep(inner.debounce).await;
            if inner.generation.load(Ordering::SeqCst) != generation {
                // A later keystroke (or escape) superseded this timer.
                return;
            }
            inner.run_search(query, generation).await;
        })
    }

    /// The single owned escape handler: clear the query, hide results,
    /// reset the has-searched flag, and invalidate pending work.
    pub fn escape(&self) {
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        self.inner.query.lock().expect("query lock poisoned").clear();
        self.inner.has_searched.store(false, Ordering::SeqCst);
    }

    /// The query string as currently typed.
    pub fn query(&self) -> String {
        self.inner.query.lock().expect("query lock poisoned").clone()
    }

    /// Whether a search has completed (or been served from cache) since
    /// the last escape/clear. Views use this to show "no results" states.
    pub fn has_searched(&self) -> bool {
        self.inner.has_searched.load(Ordering::SeqCst)
    }

    /// Results for the current query, if any are cached.
    pub fn results(&self) -> Option<Vec<Movie>> {
        let query = self.query();
        self.inner.store.read(|s| s.search_cache.get(&query).cloned())
    }
}

impl<B: SearchBackend> Inner<B> {
    async fn run_search(&self, query: String, generation: u64) {
        if query.is_empty() {
            return;
        }

        if self.store.read(|s| s.search_cache.contains_key(&query)) {
            // Served from cache; nothing to dispatch, results are already
            // in the store under this exact query string.
            self.has_searched.store(true, Ordering::SeqCst);
            return;
        }

        match self.backend.search(&query, 1).await {
            Ok(results) => {
                if self.generation.load(Ordering::SeqCst) != generation {
                    tracing::debug!(%query, "Discarding stale search results");
                    return;
                }
                self.has_searched.store(true, Ordering::SeqCst);
                self.store.dispatch(Action::SetSearchResults { query, results });
            }
            Err(err) => {
                tracing::error!(error = %err, %query, "Search request failed");
            }
        }
    }
}
