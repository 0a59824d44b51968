//! Handlers for the `/visits` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use vetrecords_core::error::CoreError;
use vetrecords_core::records::{
    validate_optional_text, validate_required_text, validate_visit_date, MAX_LONG_TEXT_LEN,
    MAX_REASON_LEN,
};
use vetrecords_core::types::DbId;
use vetrecords_db::models::visit::{CreateVisit, Visit, VisitListQuery};
use vetrecords_db::repositories::{AnimalRepo, DoctorRepo, VisitRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/visits
///
/// The animal must belong to the caller and the doctor must exist; either
/// failing is a 404.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateVisit>,
) -> AppResult<(StatusCode, Json<DataResponse<Visit>>)> {
    validate_required_text("reason", &input.reason, MAX_REASON_LEN)?;
    validate_optional_text("diagnosis", input.diagnosis.as_deref(), MAX_LONG_TEXT_LEN)?;
    validate_optional_text("treatment", input.treatment.as_deref(), MAX_LONG_TEXT_LEN)?;
    validate_optional_text("notes", input.notes.as_deref(), MAX_LONG_TEXT_LEN)?;

    let animal = AnimalRepo::find_for_owner(&state.pool, input.animal_id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found(
            "Animal",
            input.animal_id,
        )))?;

    DoctorRepo::find_by_id(&state.pool, input.doctor_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found(
            "Doctor",
            input.doctor_id,
        )))?;

    validate_visit_date(input.visit_date, animal.date_of_birth)?;

    let visit = VisitRepo::create(&state.pool, &input).await?;

    tracing::info!(
        visit_id = visit.id,
        animal_id = visit.animal_id,
        doctor_id = visit.doctor_id,
        user_id = auth.user_id,
        "Visit recorded"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: visit })))
}

/// GET /api/v1/visits?animal_id=&limit=&offset=
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<VisitListQuery>,
) -> AppResult<Json<DataResponse<Vec<Visit>>>> {
    let visits = VisitRepo::list_for_owner(&state.pool, auth.user_id, &params).await?;
    Ok(Json(DataResponse { data: visits }))
}

/// GET /api/v1/visits/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Visit>>> {
    let visit = VisitRepo::find_for_owner(&state.pool, id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Visit", id)))?;
    Ok(Json(DataResponse { data: visit }))
}
