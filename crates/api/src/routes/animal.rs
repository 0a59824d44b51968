//! Route definitions for the `/animals` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::{animal, export};
use crate::state::AppState;

/// Routes mounted at `/animals`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create
/// GET    /{id}      -> get_by_id
/// PUT    /{id}      -> update
/// DELETE /{id}      -> delete
/// GET    /{id}/pdf  -> visit_history_pdf
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(animal::list).post(animal::create))
        .route(
            "/{id}",
            get(animal::get_by_id)
                .put(animal::update)
                .delete(animal::delete),
        )
        .route("/{id}/pdf", get(export::visit_history_pdf))
}
