//! Doctor entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vetrecords_core::types::{DbId, Timestamp};

/// A doctor row from the `doctors` table. Doctors are shared by all owners.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Doctor {
    pub id: DbId,
    pub full_name: String,
    pub specialization: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new doctor.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDoctor {
    pub full_name: String,
    pub specialization: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}
