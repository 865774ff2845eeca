//! Route definitions for the `/watched` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::watched;
use crate::state::AppState;

/// Routes mounted at `/watched`.
///
/// ```text
/// GET    /watched        -> list_watched
/// POST   /watched        -> add_watched
/// DELETE /watched?id=N   -> remove_watched
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/watched",
        get(watched::list_watched)
            .post(watched::add_watched)
            .delete(watched::remove_watched),
    )
}
