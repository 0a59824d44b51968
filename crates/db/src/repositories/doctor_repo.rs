//! Repository for the `doctors` table.

use sqlx::SqlitePool;
use vetrecords_core::types::DbId;

use crate::models::doctor::{CreateDoctor, Doctor};

const COLUMNS: &str = "id, full_name, specialization, phone, email, created_at, updated_at";

/// Provides CRUD operations for doctors.
pub struct DoctorRepo;

impl DoctorRepo {
    /// Insert a new doctor, returning the created row.
    pub async fn create(pool: &SqlitePool, input: &CreateDoctor) -> Result<Doctor, sqlx::Error> {
        let query = format!(
            "INSERT INTO doctors (full_name, specialization, phone, email)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Doctor>(&query)
            .bind(&input.full_name)
            .bind(&input.specialization)
            .bind(&input.phone)
            .bind(&input.email)
            .fetch_one(pool)
            .await
    }

    /// Find a doctor by ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Doctor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM doctors WHERE id = $1");
        sqlx::query_as::<_, Doctor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all doctors ordered by name.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Doctor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM doctors ORDER BY full_name COLLATE NOCASE, id");
        sqlx::query_as::<_, Doctor>(&query).fetch_all(pool).await
    }
}
