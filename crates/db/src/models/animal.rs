//! Animal entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vetrecords_core::types::{DbId, Timestamp};

/// An animal row from the `animals` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Animal {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub sex: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    /// Media URI of the animal's photo, e.g. `/media/animals/rex.jpg`.
    pub photo: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new animal. The owner comes from the authenticated
/// user, never from the request body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAnimal {
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub sex: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub photo: Option<String>,
    pub notes: Option<String>,
}

/// DTO for updating an existing animal. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAnimal {
    pub name: Option<String>,
    pub species: Option<String>,
    pub breed: Option<String>,
    pub sex: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub photo: Option<String>,
    pub notes: Option<String>,
}
