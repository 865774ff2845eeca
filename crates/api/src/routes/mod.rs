pub mod health;
pub mod movies;
pub mod search;
pub mod watched;

use axum::Router;

use crate::state::AppState;

/// Build the public route tree (mounted at the server root).
///
/// ```text
/// GET    /categories/{category}     category listing proxy
/// GET    /search                    search proxy
/// POST   /watched                   add to watched list
/// GET    /watched                   list watched movies
/// DELETE /watched                   remove by surrogate id
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(movies::router())
        .merge(search::router())
        .merge(watched::router())
}
