//! HTTP client for the filmlog server.
//!
//! Speaks the server's public surface (`/categories`, `/search`,
//! `/watched`) and implements the backend traits the controllers are
//! generic over.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use filmlog_core::movie::{BrowseCategory, Movie};
use filmlog_core::types::DbId;
use filmlog_db::models::watched_movie::WatchedMovie;

use crate::browse::BrowseBackend;
use crate::search::SearchBackend;
use crate::watched::WatchedBackend;

/// Errors from the server-facing client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with an error envelope.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// The `error` field of the response body, or the raw body.
        message: String,
    },
}

/// Client for one filmlog server.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

/// `{ success, movies }` from `GET /watched`.
#[derive(Deserialize)]
struct WatchedListEnvelope {
    movies: Vec<WatchedMovie>,
}

/// `{ success, message, movie }` from `POST /watched` and `DELETE /watched`.
#[derive(Deserialize)]
struct MovieMutationEnvelope {
    movie: WatchedMovie,
}

/// The slice of a provider listing/search page the views consume.
#[derive(Deserialize)]
struct ResultsPage {
    results: Vec<Movie>,
}

impl ApiClient {
    /// Create a client for a server base URL, e.g. `http://localhost:3000`.
    pub fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Parse a 2xx body as `T`; map anything else to [`ClientError::Api`]
    /// carrying the server's `error` message.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl SearchBackend for ApiClient {
    async fn search(&self, query: &str, page: u32) -> Result<Vec<Movie>, ClientError> {
        let response = self
            .http
            .get(format!("{}/search", self.base_url))
            .query(&[("query", query), ("page", page.to_string().as_str())])
            .send()
            .await?;

        let page: ResultsPage = Self::parse_response(response).await?;
        Ok(page.results)
    }
}

#[async_trait]
impl BrowseBackend for ApiClient {
    async fn category_listing(
        &self,
        category: BrowseCategory,
        page: u32,
    ) -> Result<Vec<Movie>, ClientError> {
        let response = self
            .http
            .get(format!("{}/categories/{}", self.base_url, category))
            .query(&[("page", page.to_string())])
            .send()
            .await?;

        let page: ResultsPage = Self::parse_response(response).await?;
        Ok(page.results)
    }
}

#[async_trait]
impl WatchedBackend for ApiClient {
    async fn add_watched(&self, movie: &Movie) -> Result<WatchedMovie, ClientError> {
        let response = self
            .http
            .post(format!("{}/watched", self.base_url))
            .json(movie)
            .send()
            .await?;

        let envelope: MovieMutationEnvelope = Self::parse_response(response).await?;
        Ok(envelope.movie)
    }

    async fn list_watched(&self) -> Result<Vec<WatchedMovie>, ClientError> {
        let response = self
            .http
            .get(format!("{}/watched", self.base_url))
            .send()
            .await?;

        let envelope: WatchedListEnvelope = Self::parse_response(response).await?;
        Ok(envelope.movies)
    }

    async fn remove_watched(&self, id: DbId) -> Result<WatchedMovie, ClientError> {
        let response = self
            .http
            .delete(format!("{}/watched", self.base_url))
            .query(&[("id", id.to_string())])
            .send()
            .await?;

        let envelope: MovieMutationEnvelope = Self::parse_response(response).await?;
        Ok(envelope.movie)
    }
}
