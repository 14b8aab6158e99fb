//! Argon2id password hashing.

use super::StoreError;
use argon2::{
    Argon2,
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use once_cell::sync::Lazy;
use rand::rngs::OsRng;

// Hash of a throwaway password, verified against when a login does not exist.
static DUMMY_HASH: Lazy<Option<String>> = Lazy::new(|| hash("credo-dummy-password").ok());

/// Hash `password` with a fresh salt and the default Argon2id cost.
///
/// # Errors
/// Returns [`StoreError::System`] if hashing fails.
pub fn hash(password: &str) -> Result<String, StoreError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| StoreError::system("generating hash", e))
}

/// Compare `password` with a stored PHC hash string.
///
/// # Errors
/// [`StoreError::WrongPassword`] on mismatch, [`StoreError::System`] if the
/// stored hash can't be parsed or verified.
pub fn verify(password: &str, stored: &str) -> Result<(), StoreError> {
    let parsed =
        PasswordHash::new(stored).map_err(|e| StoreError::system("parsing stored hash", e))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(()),
        Err(password_hash::Error::Password) => Err(StoreError::WrongPassword),
        Err(e) => Err(StoreError::system("verifying hash", e)),
    }
}

/// Run a full verification against a throwaway hash so an unknown login
/// costs as much as a wrong password. The outcome is ignored.
pub fn verify_dummy(password: &str) {
    if let Some(stored) = DUMMY_HASH.as_deref() {
        let _ = verify(password, stored);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_salted_phc_string() -> Result<(), StoreError> {
        let first = hash("secret123")?;
        let second = hash("secret123")?;

        assert!(first.starts_with("$argon2id$"));
        assert!(!first.contains("secret123"));
        assert_ne!(first, second);
        Ok(())
    }

    #[test]
    fn verify_accepts_matching_password() -> Result<(), StoreError> {
        let stored = hash("secret123")?;
        verify("secret123", &stored)
    }

    #[test]
    fn verify_rejects_wrong_password() -> Result<(), StoreError> {
        let stored = hash("secret123")?;
        let result = verify("wrong", &stored);
        assert!(matches!(result, Err(StoreError::WrongPassword)));
        Ok(())
    }

    #[test]
    fn dummy_hash_uses_the_same_parameters() -> Result<(), StoreError> {
        let dummy = DUMMY_HASH
            .as_deref()
            .ok_or_else(|| StoreError::system("dummy hash", "not generated"))?;
        let real = hash("secret123")?;

        let params = |phc: &str| phc.rsplitn(3, '$').nth(2).map(str::to_string);
        assert!(dummy.starts_with("$argon2id$"));
        assert_eq!(params(dummy), params(&real));

        verify_dummy("anything");
        Ok(())
    }

    #[test]
    fn malformed_hash_is_a_system_error() {
        let result = verify("secret123", "not-a-phc-string");
        assert!(matches!(result, Err(StoreError::System { .. })));
    }
}
