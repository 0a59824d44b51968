//! Repository for the `visits` table.
//!
//! Reads always join `animals` and `doctors` so rows carry display names,
//! and owner-scoped reads filter on `animals.owner_id`.

use sqlx::SqlitePool;
use vetrecords_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use vetrecords_core::types::DbId;

use crate::models::visit::{CreateVisit, Visit, VisitListQuery};

const SELECT_JOINED: &str = "SELECT v.id, v.animal_id, a.name AS animal_name, \
                                    v.doctor_id, d.full_name AS doctor_name, \
                                    v.visit_date, v.reason, v.diagnosis, v.treatment, v.notes, \
                                    v.created_at, v.updated_at \
                             FROM visits v \
                             JOIN animals a ON a.id = v.animal_id \
                             JOIN doctors d ON d.id = v.doctor_id";

/// Provides visit logging and owner-scoped visit queries.
pub struct VisitRepo;

impl VisitRepo {
    /// Insert a new visit, returning it joined with animal and doctor names.
    ///
    /// Ownership of `input.animal_id` must be checked by the caller.
    pub async fn create(pool: &SqlitePool, input: &CreateVisit) -> Result<Visit, sqlx::Error> {
        let (id,): (DbId,) = sqlx::query_as(
            "INSERT INTO visits (animal_id, doctor_id, visit_date, reason, diagnosis, treatment, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id",
        )
        .bind(input.animal_id)
        .bind(input.doctor_id)
        .bind(input.visit_date)
        .bind(&input.reason)
        .bind(&input.diagnosis)
        .bind(&input.treatment)
        .bind(&input.notes)
        .fetch_one(pool)
        .await?;

        let query = format!("{SELECT_JOINED} WHERE v.id = $1");
        sqlx::query_as::<_, Visit>(&query)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Find a visit by ID, only if its animal belongs to `owner_id`.
    pub async fn find_for_owner(
        pool: &SqlitePool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<Visit>, sqlx::Error> {
        let query = format!("{SELECT_JOINED} WHERE v.id = $1 AND a.owner_id = $2");
        sqlx::query_as::<_, Visit>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// List visits of an owner's animals, newest first, with optional
    /// animal filter and pagination.
    pub async fn list_for_owner(
        pool: &SqlitePool,
        owner_id: DbId,
        params: &VisitListQuery,
    ) -> Result<Vec<Visit>, sqlx::Error> {
        let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
        let offset = clamp_offset(params.offset);

        let query = format!(
            "{SELECT_JOINED}
             WHERE a.owner_id = $1
               AND ($2 IS NULL OR v.animal_id = $2)
             ORDER BY v.visit_date DESC, v.id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Visit>(&query)
            .bind(owner_id)
            .bind(params.animal_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// All visits of one animal, newest first. Used for the visit-history
    /// export after the animal's ownership has been checked.
    pub async fn list_for_animal(
        pool: &SqlitePool,
        animal_id: DbId,
    ) -> Result<Vec<Visit>, sqlx::Error> {
        let query = format!(
            "{SELECT_JOINED} WHERE v.animal_id = $1 ORDER BY v.visit_date DESC, v.id DESC"
        );
        sqlx::query_as::<_, Visit>(&query)
            .bind(animal_id)
            .fetch_all(pool)
            .await
    }

    /// Count visits across all of an owner's animals.
    pub async fn count_for_owner(pool: &SqlitePool, owner_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM visits v JOIN animals a ON a.id = v.animal_id WHERE a.owner_id = $1",
        )
        .bind(owner_id)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }
}
