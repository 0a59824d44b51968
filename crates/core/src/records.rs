//! Field rules for animals, doctors and visits.
//!
//! Handlers compose these per DTO; the functions themselves only know about
//! strings and dates so they can be tested without a database.

use chrono::NaiveDate;

use crate::error::CoreError;

pub const MAX_ANIMAL_NAME_LEN: usize = 100;
pub const MAX_SPECIES_LEN: usize = 50;
pub const MAX_BREED_LEN: usize = 100;
pub const MAX_SEX_LEN: usize = 20;
pub const MAX_URI_LEN: usize = 255;

pub const MAX_DOCTOR_NAME_LEN: usize = 150;
pub const MAX_SPECIALIZATION_LEN: usize = 100;
pub const MAX_PHONE_LEN: usize = 30;

pub const MAX_REASON_LEN: usize = 255;
/// Diagnosis, treatment and free-form notes.
pub const MAX_LONG_TEXT_LEN: usize = 2000;

/// Validate a required text field: non-blank and at most `max` characters.
pub fn validate_required_text(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    validate_max_len(field, value, max)
}

/// Validate an optional text field. `None` is always accepted.
pub fn validate_optional_text(
    field: &str,
    value: Option<&str>,
    max: usize,
) -> Result<(), CoreError> {
    match value {
        Some(v) => validate_max_len(field, v, max),
        None => Ok(()),
    }
}

fn validate_max_len(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    if value.chars().count() > max {
        return Err(CoreError::Validation(format!(
            "{field} must not exceed {max} characters"
        )));
    }
    Ok(())
}

/// A date of birth may not lie after `today`.
pub fn validate_date_of_birth(date_of_birth: NaiveDate, today: NaiveDate) -> Result<(), CoreError> {
    if date_of_birth > today {
        return Err(CoreError::Validation(
            "Date of birth cannot be in the future".to_string(),
        ));
    }
    Ok(())
}

/// A visit cannot be dated before the animal was born.
pub fn validate_visit_date(
    visit_date: NaiveDate,
    date_of_birth: Option<NaiveDate>,
) -> Result<(), CoreError> {
    if let Some(born) = date_of_birth {
        if visit_date < born {
            return Err(CoreError::Validation(format!(
                "Visit date {visit_date} is before the animal's date of birth {born}"
            )));
        }
    }
    Ok(())
}
