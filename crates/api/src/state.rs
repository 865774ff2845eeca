use std::sync::Arc;

use filmlog_tmdb::TmdbClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: filmlog_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// TMDb client, present only when `TMDB_API_KEY` is configured.
    pub tmdb: Option<Arc<TmdbClient>>,
}

impl AppState {
    /// Build state from config and a pool, constructing the TMDb client
    /// when a credential is present.
    pub fn new(pool: filmlog_db::DbPool, config: ServerConfig) -> Self {
        let tmdb = config.tmdb_api_key.clone().map(|key| {
            Arc::new(TmdbClient::with_base_url(
                key,
                config.tmdb_base_url.clone(),
            ))
        });

        Self {
            pool,
            config: Arc::new(config),
            tmdb,
        }
    }
}
