//! Handler for the visit-history PDF.

use axum::extract::{Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::IntoResponse;
use chrono::Utc;
use vetrecords_core::error::CoreError;
use vetrecords_core::types::DbId;
use vetrecords_db::repositories::{AnimalRepo, UserRepo, VisitRepo};

use crate::error::{AppError, AppResult};
use crate::export::{render_visit_history, VisitHistory};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/animals/{id}/pdf
///
/// Render the animal's profile and all of its visits, newest first.
pub async fn visit_history_pdf(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let animal = AnimalRepo::find_for_owner(&state.pool, id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Animal", id)))?;

    let owner = UserRepo::find_by_id(&state.pool, animal.owner_id)
        .await?
        .ok_or_else(|| AppError::InternalError(format!("Owner of animal {id} is missing")))?;

    let visits = VisitRepo::list_for_animal(&state.pool, animal.id).await?;
    let visit_count = visits.len();

    let history = VisitHistory {
        animal,
        owner_name: owner.display_name(),
        visits,
        generated_on: Utc::now().date_naive(),
        logo_uri: Some(state.config.assets.report_logo_uri.clone())
            .filter(|uri| !uri.is_empty()),
    };

    // Layout and image decoding are CPU-bound.
    let assets = state.assets.clone();
    let bytes = tokio::task::spawn_blocking(move || render_visit_history(&history, &*assets))
        .await
        .map_err(|e| AppError::InternalError(format!("PDF render task failed: {e}")))??;

    tracing::info!(
        animal_id = id,
        user_id = auth.user_id,
        visits = visit_count,
        bytes = bytes.len(),
        "Visit history exported"
    );

    Ok((
        [
            (CONTENT_TYPE, "application/pdf".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("inline; filename=\"visit-history-{id}.pdf\""),
            ),
        ],
        bytes,
    ))
}
