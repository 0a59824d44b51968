//! Password storage and the rules new passwords must meet.
//!
//! Hashes are Argon2id PHC strings, so the salt and cost parameters travel
//! with the hash.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{Error, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

pub const MIN_PASSWORD_LENGTH: usize = 8;

pub fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
}

/// `Ok(false)` on a mismatch; `Err` only when `stored` is not a valid PHC string.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, Error> {
    let parsed = PasswordHash::new(stored)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Check a password chosen at registration against its confirmation.
///
/// The error string is shown to the user as-is.
pub fn validate_new_password(password: &str, confirmation: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        ));
    }
    if password != confirmation {
        return Err("The two password fields didn't match".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_hash_verifies_only_the_original_password() {
        let stored = hash_password("rex-and-whiskers").unwrap();

        assert!(stored.starts_with("$argon2id$"));
        assert!(verify_password("rex-and-whiskers", &stored).unwrap());
        assert!(!verify_password("rex-and-whiskerz", &stored).unwrap());
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        assert_ne!(hash_password("repeat-me").unwrap(), hash_password("repeat-me").unwrap());
    }

    #[test]
    fn garbage_hash_is_an_error() {
        assert!(verify_password("anything", "plaintext-in-db").is_err());
    }

    #[test]
    fn length_is_counted_in_characters() {
        assert!(validate_new_password("ééééééé", "ééééééé").is_err());
        assert!(validate_new_password("éééééééé", "éééééééé").is_ok());
    }

    #[test]
    fn confirmation_must_match() {
        let msg = validate_new_password("long-enough-1", "long-enough-2").unwrap_err();
        assert!(msg.contains("didn't match"));
    }
}
