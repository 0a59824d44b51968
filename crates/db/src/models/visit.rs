//! Visit entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vetrecords_core::types::{DbId, Timestamp};

/// A visit row joined with the names of its animal and doctor.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Visit {
    pub id: DbId,
    pub animal_id: DbId,
    pub animal_name: String,
    pub doctor_id: DbId,
    pub doctor_name: String,
    pub visit_date: NaiveDate,
    pub reason: String,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for logging a new visit.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVisit {
    pub animal_id: DbId,
    pub doctor_id: DbId,
    pub visit_date: NaiveDate,
    pub reason: String,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub notes: Option<String>,
}

/// Filter and pagination for visit listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VisitListQuery {
    pub animal_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
