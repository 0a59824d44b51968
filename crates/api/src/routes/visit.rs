//! Route definitions for the `/visits` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::visit;
use crate::state::AppState;

/// Routes mounted at `/visits`.
///
/// ```text
/// GET  /      -> list (?animal_id=&limit=&offset=)
/// POST /      -> create
/// GET  /{id}  -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(visit::list).post(visit::create))
        .route("/{id}", get(visit::get_by_id))
}
