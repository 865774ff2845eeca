//! The shared client state and its reducer.
//!
//! One [`Store`] exists per session, owned by the composition root and
//! handed to controllers by `Arc`. All mutation goes through
//! [`Store::dispatch`], which applies the pure [`reduce`] function under a
//! lock -- no two actions ever interleave.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use filmlog_core::movie::{BrowseCategory, Movie};
use filmlog_core::types::DbId;
use filmlog_db::models::watched_movie::WatchedMovie;

/// Everything a session's views read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientState {
    /// Query string → results previously returned for exactly that string.
    /// Never invalidated within a session.
    pub search_cache: HashMap<String, Vec<Movie>>,
    /// The authoritative watched list, most recently saved first.
    pub watched_movies: Vec<WatchedMovie>,
    /// True while the bootstrap fetch of the watched list is in flight.
    pub is_loading_watched: bool,
    /// Category → fetched listing page.
    pub browse_lists: HashMap<BrowseCategory, Vec<Movie>>,
    /// Categories currently being fetched.
    pub loading_browse_lists: HashSet<BrowseCategory>,
}

/// Named state transitions. The enum is exhaustive, so the reducer is
/// total by construction.
#[derive(Debug, Clone)]
pub enum Action {
    SetSearchResults {
        query: String,
        results: Vec<Movie>,
    },
    SetWatchedMovies(Vec<WatchedMovie>),
    AddWatchedMovie(WatchedMovie),
    RemoveWatchedMovie(DbId),
    SetLoadingWatched(bool),
    SetBrowseList {
        category: BrowseCategory,
        movies: Vec<Movie>,
    },
    SetLoadingBrowseList {
        category: BrowseCategory,
        is_loading: bool,
    },
}

/// Pure reducer: `(state, action) -> state`. Performs no I/O.
pub fn reduce(mut state: ClientState, action: Action) -> ClientState {
    match action {
        Action::SetSearchResults { query, results } => {
            state.search_cache.insert(query, results);
        }
        Action::SetWatchedMovies(movies) => {
            state.watched_movies = movies;
            state.is_loading_watched = false;
        }
        Action::AddWatchedMovie(movie) => {
            // Most-recent-first, matching the server's list order.
            state.watched_movies.insert(0, movie);
        }
        Action::RemoveWatchedMovie(id) => {
            state.watched_movies.retain(|m| m.id != id);
        }
        Action::SetLoadingWatched(loading) => {
            state.is_loading_watched = loading;
        }
        Action::SetBrowseList { category, movies } => {
            state.browse_lists.insert(category, movies);
        }
        Action::SetLoadingBrowseList {
            category,
            is_loading,
        } => {
            if is_loading {
                state.loading_browse_lists.insert(category);
            } else {
                state.loading_browse_lists.remove(&category);
            }
        }
    }
    state
}

/// The single shared state store for a session.
#[derive(Debug, Default)]
pub struct Store {
    state: Mutex<ClientState>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an action to the current state.
    pub fn dispatch(&self, action: Action) {
        let mut guard = self.state.lock().expect("state lock poisoned");
        let state = std::mem::take(&mut *guard);
        *guard = reduce(state, action);
    }

    /// Read a projection of the current state.
    pub fn read<R>(&self, f: impl FnOnce(&ClientState) -> R) -> R {
        let guard = self.state.lock().expect("state lock poisoned");
        f(&guard)
    }

    /// Snapshot the whole state (tests, debugging).
    pub fn snapshot(&self) -> ClientState {
        self.read(Clone::clone)
    }
}
