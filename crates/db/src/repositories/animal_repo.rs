//! Repository for the `animals` table.
//!
//! Every method except [`AnimalRepo::create`] takes the owner's id and
//! filters on it; a row owned by someone else behaves exactly like a
//! missing row.

use sqlx::SqlitePool;
use vetrecords_core::types::DbId;

use super::NOW;
use crate::models::animal::{Animal, CreateAnimal, UpdateAnimal};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, name, species, breed, sex, date_of_birth, photo, notes, \
                        created_at, updated_at";

/// Provides owner-scoped CRUD operations for animals.
pub struct AnimalRepo;

impl AnimalRepo {
    /// Insert a new animal for `owner_id`, returning the created row.
    pub async fn create(
        pool: &SqlitePool,
        owner_id: DbId,
        input: &CreateAnimal,
    ) -> Result<Animal, sqlx::Error> {
        let query = format!(
            "INSERT INTO animals (owner_id, name, species, breed, sex, date_of_birth, photo, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Animal>(&query)
            .bind(owner_id)
            .bind(&input.name)
            .bind(&input.species)
            .bind(&input.breed)
            .bind(&input.sex)
            .bind(input.date_of_birth)
            .bind(&input.photo)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find an animal by ID, only if it belongs to `owner_id`.
    pub async fn find_for_owner(
        pool: &SqlitePool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<Animal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM animals WHERE id = $1 AND owner_id = $2");
        sqlx::query_as::<_, Animal>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// List an owner's animals ordered by name.
    pub async fn list_for_owner(
        pool: &SqlitePool,
        owner_id: DbId,
    ) -> Result<Vec<Animal>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM animals WHERE owner_id = $1 ORDER BY name COLLATE NOCASE, id"
        );
        sqlx::query_as::<_, Animal>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Count an owner's animals.
    pub async fn count_for_owner(pool: &SqlitePool, owner_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM animals WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Update an owner's animal. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists for this owner.
    pub async fn update_for_owner(
        pool: &SqlitePool,
        id: DbId,
        owner_id: DbId,
        input: &UpdateAnimal,
    ) -> Result<Option<Animal>, sqlx::Error> {
        let query = format!(
            "UPDATE animals SET
                name = COALESCE($3, name),
                species = COALESCE($4, species),
                breed = COALESCE($5, breed),
                sex = COALESCE($6, sex),
                date_of_birth = COALESCE($7, date_of_birth),
                photo = COALESCE($8, photo),
                notes = COALESCE($9, notes),
                updated_at = {NOW}
             WHERE id = $1 AND owner_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Animal>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(&input.name)
            .bind(&input.species)
            .bind(&input.breed)
            .bind(&input.sex)
            .bind(input.date_of_birth)
            .bind(&input.photo)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete an owner's animal (visits cascade). Returns `true` if a row was removed.
    pub async fn delete_for_owner(
        pool: &SqlitePool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM animals WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
