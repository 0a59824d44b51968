use axum::routing::get;
use axum::Router;

use crate::handlers::home;
use crate::state::AppState;

/// Mount the landing route (root level, not under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(home::home))
}
