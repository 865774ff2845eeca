//! Route definitions for the category listing proxy.

use axum::routing::get;
use axum::Router;

use crate::handlers::movies;
use crate::state::AppState;

/// Routes mounted at `/categories`.
pub fn router() -> Router<AppState> {
    Router::new().route("/categories/{category}", get(movies::category_listing))
}
