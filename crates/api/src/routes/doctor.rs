//! Route definitions for the `/doctors` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::doctor;
use crate::state::AppState;

/// Routes mounted at `/doctors`.
///
/// ```text
/// GET  /      -> list
/// POST /      -> create
/// GET  /{id}  -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(doctor::list).post(doctor::create))
        .route("/{id}", get(doctor::get_by_id))
}
