//! Handlers for the `/animals` resource.
//!
//! Every query is scoped to the authenticated owner. An animal that belongs
//! to someone else is reported as not found.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use vetrecords_core::error::CoreError;
use vetrecords_core::records::{
    validate_date_of_birth, validate_optional_text, validate_required_text, MAX_ANIMAL_NAME_LEN,
    MAX_BREED_LEN, MAX_LONG_TEXT_LEN, MAX_SEX_LEN, MAX_SPECIES_LEN, MAX_URI_LEN,
};
use vetrecords_core::types::DbId;
use vetrecords_db::models::animal::{Animal, CreateAnimal, UpdateAnimal};
use vetrecords_db::repositories::AnimalRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/animals
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateAnimal>,
) -> AppResult<(StatusCode, Json<DataResponse<Animal>>)> {
    validate_create_input(&input)?;

    let animal = AnimalRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(
        animal_id = animal.id,
        user_id = auth.user_id,
        "Animal created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: animal })))
}

/// GET /api/v1/animals
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Animal>>>> {
    let animals = AnimalRepo::list_for_owner(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: animals }))
}

/// GET /api/v1/animals/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Animal>>> {
    let animal = AnimalRepo::find_for_owner(&state.pool, id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Animal", id)))?;
    Ok(Json(DataResponse { data: animal }))
}

/// PUT /api/v1/animals/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAnimal>,
) -> AppResult<Json<DataResponse<Animal>>> {
    validate_update_input(&input)?;

    let animal = AnimalRepo::update_for_owner(&state.pool, id, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Animal", id)))?;

    tracing::info!(animal_id = id, user_id = auth.user_id, "Animal updated");

    Ok(Json(DataResponse { data: animal }))
}

/// DELETE /api/v1/animals/{id}
///
/// Visits of the animal are removed with it.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = AnimalRepo::delete_for_owner(&state.pool, id, auth.user_id).await?;
    if deleted {
        tracing::info!(animal_id = id, user_id = auth.user_id, "Animal deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("Animal", id)))
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_create_input(input: &CreateAnimal) -> Result<(), CoreError> {
    validate_required_text("name", &input.name, MAX_ANIMAL_NAME_LEN)?;
    validate_required_text("species", &input.species, MAX_SPECIES_LEN)?;
    validate_optional_fields(
        input.breed.as_deref(),
        input.sex.as_deref(),
        input.photo.as_deref(),
        input.notes.as_deref(),
    )?;
    if let Some(dob) = input.date_of_birth {
        validate_date_of_birth(dob, Utc::now().date_naive())?;
    }
    Ok(())
}

fn validate_update_input(input: &UpdateAnimal) -> Result<(), CoreError> {
    if let Some(name) = &input.name {
        validate_required_text("name", name, MAX_ANIMAL_NAME_LEN)?;
    }
    if let Some(species) = &input.species {
        validate_required_text("species", species, MAX_SPECIES_LEN)?;
    }
    validate_optional_fields(
        input.breed.as_deref(),
        input.sex.as_deref(),
        input.photo.as_deref(),
        input.notes.as_deref(),
    )?;
    if let Some(dob) = input.date_of_birth {
        validate_date_of_birth(dob, Utc::now().date_naive())?;
    }
    Ok(())
}

fn validate_optional_fields(
    breed: Option<&str>,
    sex: Option<&str>,
    photo: Option<&str>,
    notes: Option<&str>,
) -> Result<(), CoreError> {
    validate_optional_text("breed", breed, MAX_BREED_LEN)?;
    validate_optional_text("sex", sex, MAX_SEX_LEN)?;
    validate_optional_text("photo", photo, MAX_URI_LEN)?;
    validate_optional_text("notes", notes, MAX_LONG_TEXT_LEN)
}
