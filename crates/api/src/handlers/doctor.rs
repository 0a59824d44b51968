//! Handlers for the `/doctors` resource. Doctors are shared between owners.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use vetrecords_core::account::validate_email;
use vetrecords_core::error::CoreError;
use vetrecords_core::records::{
    validate_optional_text, validate_required_text, MAX_DOCTOR_NAME_LEN, MAX_PHONE_LEN,
    MAX_SPECIALIZATION_LEN,
};
use vetrecords_core::types::DbId;
use vetrecords_db::models::doctor::{CreateDoctor, Doctor};
use vetrecords_db::repositories::DoctorRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/doctors
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateDoctor>,
) -> AppResult<(StatusCode, Json<DataResponse<Doctor>>)> {
    validate_required_text("full_name", &input.full_name, MAX_DOCTOR_NAME_LEN)?;
    validate_required_text(
        "specialization",
        &input.specialization,
        MAX_SPECIALIZATION_LEN,
    )?;
    validate_optional_text("phone", input.phone.as_deref(), MAX_PHONE_LEN)?;
    if let Some(email) = input.email.as_deref() {
        validate_email("email", email)?;
    }

    let doctor = DoctorRepo::create(&state.pool, &input).await?;

    tracing::info!(doctor_id = doctor.id, user_id = auth.user_id, "Doctor created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: doctor })))
}

/// GET /api/v1/doctors
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Doctor>>>> {
    let doctors = DoctorRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: doctors }))
}

/// GET /api/v1/doctors/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Doctor>>> {
    let doctor = DoctorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Doctor", id)))?;
    Ok(Json(DataResponse { data: doctor }))
}
