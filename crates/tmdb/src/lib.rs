//! REST client for the TMDb v3 API.
//!
//! Wraps the two provider endpoints the proxy forwards (category listings
//! and movie search) using [`reqwest`]. Responses are passed through as
//! raw JSON; the proxy never reshapes provider payloads.

use filmlog_core::movie::BrowseCategory;

/// Default TMDb API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// HTTP client for the TMDb API, holding the server-side credential.
pub struct TmdbClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Errors from the TMDb client.
#[derive(Debug, thiserror::Error)]
pub enum TmdbError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// TMDb returned a non-2xx status code.
    #[error("TMDb API error ({status})")]
    Api {
        /// HTTP status code from the provider.
        status: u16,
        /// The provider's own error body, relayed to callers verbatim.
        details: serde_json::Value,
    },
}

impl TmdbClient {
    /// Create a client against the production TMDb API.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Create a client against a custom base URL (tests, proxies).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Fetch one page of a category listing, e.g. `GET /movie/top_rated`.
    ///
    /// Returns the provider's paginated listing JSON unchanged.
    pub async fn movie_list(
        &self,
        category: BrowseCategory,
        page: u32,
    ) -> Result<serde_json::Value, TmdbError> {
        let response = self
            .client
            .get(format!(
                "{}/movie/{}",
                self.base_url,
                category.provider_endpoint()
            ))
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", "en-US"),
                ("page", page.to_string().as_str()),
            ])
            .header("accept", "application/json")
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Search movies by free text, `GET /search/movie`.
    ///
    /// The query string is forwarded verbatim (an empty string is a valid
    /// provider query and fails on their side, not ours).
    pub async fn search_movies(
        &self,
        query: &str,
        page: u32,
    ) -> Result<serde_json::Value, TmdbError> {
        let response = self
            .client
            .get(format!("{}/search/movie", self.base_url))
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", query),
                ("include_adult", "false"),
                ("language", "en-US"),
                ("page", page.to_string().as_str()),
            ])
            .header("accept", "application/json")
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Pass 2xx bodies through as JSON; map anything else to
    /// [`TmdbError::Api`] carrying the provider's status and error body.
    async fn parse_response(response: reqwest::Response) -> Result<serde_json::Value, TmdbError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            // Provider errors are JSON (`{status_code, status_message}`),
            // but don't trust that under outages.
            let details = response
                .json::<serde_json::Value>()
                .await
                .unwrap_or_else(|_| serde_json::Value::String("unreadable error body".into()));
            Err(TmdbError::Api {
                status: status.as_u16(),
                details,
            })
        }
    }
}
