//! Request handlers.
//!
//! `movies` and `search` are thin proxies to the metadata provider;
//! `watched` fronts the `watched_movies` table. Handlers delegate to
//! `filmlog_tmdb` / `filmlog_db` and map errors via [`crate::error::AppError`].

pub mod movies;
pub mod search;
pub mod watched;
