use filmlog_tmdb::DEFAULT_BASE_URL;

/// Server configuration loaded from environment variables.
///
/// All fields except the TMDb API key have defaults suitable for local
/// development. The key stays optional at startup: the proxy endpoints
/// report the missing credential per-request rather than refusing to boot,
/// so the watched-list endpoints keep working without it.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// TMDb API key (`TMDB_API_KEY`), if configured.
    pub tmdb_api_key: Option<String>,
    /// TMDb API base URL (`TMDB_BASE_URL`), overridable for tests.
    pub tmdb_base_url: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                       |
    /// |------------------------|-------------------------------|
    /// | `HOST`                 | `0.0.0.0`                     |
    /// | `PORT`                 | `3000`                        |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`       |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                          |
    /// | `TMDB_API_KEY`         | unset                         |
    /// | `TMDB_BASE_URL`        | `https://api.themoviedb.org/3`|
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let tmdb_api_key = std::env::var("TMDB_API_KEY").ok().filter(|k| !k.is_empty());

        let tmdb_base_url =
            std::env::var("TMDB_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            tmdb_api_key,
            tmdb_base_url,
        }
    }
}
