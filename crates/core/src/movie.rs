//! The transient movie shape returned by the metadata provider, and the
//! browse category tokens the listing endpoints accept.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A movie as the metadata provider describes it.
///
/// Constructed from provider JSON on every fetch and never persisted
/// as-is; the db crate derives its insert payload from this (with
/// null-coalescing for the optional fields).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Provider-assigned identifier (`tmdb_id` once persisted).
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    /// `YYYY-MM-DD`; the provider sends an empty string for unknown dates.
    #[serde(default)]
    pub release_date: Option<String>,
    /// Average rating on the provider's 0.0–10.0 scale.
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub genre_ids: Option<Vec<i32>>,
    #[serde(default)]
    pub adult: bool,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub video: bool,
    #[serde(default)]
    pub vote_count: Option<i64>,
}

/// The four browse listing categories the proxy forwards.
///
/// The URL token (`top-rated`) and the provider endpoint (`top_rated`)
/// differ, so both spellings live here and nowhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BrowseCategory {
    Popular,
    TopRated,
    NowPlaying,
    Upcoming,
}

impl BrowseCategory {
    /// The URL path token, e.g. `top-rated`.
    pub fn as_str(self) -> &'static str {
        match self {
            BrowseCategory::Popular => "popular",
            BrowseCategory::TopRated => "top-rated",
            BrowseCategory::NowPlaying => "now-playing",
            BrowseCategory::Upcoming => "upcoming",
        }
    }

    /// The provider's endpoint name under `/movie/`, e.g. `top_rated`.
    pub fn provider_endpoint(self) -> &'static str {
        match self {
            BrowseCategory::Popular => "popular",
            BrowseCategory::TopRated => "top_rated",
            BrowseCategory::NowPlaying => "now_playing",
            BrowseCategory::Upcoming => "upcoming",
        }
    }

    /// All categories, in the order the dashboard shows them.
    pub fn all() -> [BrowseCategory; 4] {
        [
            BrowseCategory::Popular,
            BrowseCategory::TopRated,
            BrowseCategory::NowPlaying,
            BrowseCategory::Upcoming,
        ]
    }
}

impl fmt::Display for BrowseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a category token is not one of the four known ones.
#[derive(Debug, thiserror::Error)]
#[error("Invalid category: {0}")]
pub struct InvalidCategory(pub String);

impl FromStr for BrowseCategory {
    type Err = InvalidCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popular" => Ok(BrowseCategory::Popular),
            "top-rated" => Ok(BrowseCategory::TopRated),
            "now-playing" => Ok(BrowseCategory::NowPlaying),
            "upcoming" => Ok(BrowseCategory::Upcoming),
            other => Err(InvalidCategory(other.to_string())),
        }
    }
}
