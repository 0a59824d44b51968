//! Account field rules: usernames and email addresses.
//!
//! Password strength lives next to the hashing code in the API crate.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Maximum username length in characters.
pub const MAX_USERNAME_LEN: usize = 150;

/// Maximum email length (RFC 5321 path limit).
pub const MAX_EMAIL_LEN: usize = 254;

/// Maximum length for first/last name.
pub const MAX_PERSON_NAME_LEN: usize = 150;

/// Letters, digits and `@ . + - _`.
static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.@+-]+$").expect("valid regex"));

/// Validate a username.
///
/// Rules:
/// - Must not be empty or longer than [`MAX_USERNAME_LEN`] characters.
/// - May only contain letters, digits and `@ . + - _`.
pub fn validate_username(username: &str) -> Result<(), CoreError> {
    if username.is_empty() {
        return Err(CoreError::Validation(
            "Username must not be empty".to_string(),
        ));
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(CoreError::Validation(format!(
            "Username must not exceed {MAX_USERNAME_LEN} characters"
        )));
    }
    if !USERNAME_RE.is_match(username) {
        return Err(CoreError::Validation(
            "Username may only contain letters, digits and @/./+/-/_ characters".to_string(),
        ));
    }
    Ok(())
}

/// Validate an email address.
///
/// This is a shape check, not deliverability: exactly one `@`, a non-empty
/// local part, a dotted domain (or `localhost`), no whitespace.
pub fn validate_email(field: &str, email: &str) -> Result<(), CoreError> {
    if email.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if email.len() > MAX_EMAIL_LEN {
        return Err(CoreError::Validation(format!(
            "{field} must not exceed {MAX_EMAIL_LEN} characters"
        )));
    }
    if email.chars().any(char::is_whitespace) {
        return Err(CoreError::Validation(format!(
            "{field} must not contain whitespace"
        )));
    }

    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => {
            return Err(CoreError::Validation(format!(
                "{field} must contain exactly one '@'"
            )))
        }
    };

    let dotted = domain.split('.').filter(|label| !label.is_empty()).count() >= 2
        && !domain.starts_with('.')
        && !domain.ends_with('.');
    let domain_ok = dotted || domain.eq_ignore_ascii_case("localhost");

    if local.is_empty() || !domain_ok {
        return Err(CoreError::Validation(format!(
            "{field} is not a valid email address"
        )));
    }
    Ok(())
}
