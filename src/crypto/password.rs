//! Password hashing using Argon2id
//!
//! Passwords are stored as PHC strings (`$argon2id$v=19$...`) which carry
//! their own salt and parameters, so verification needs nothing but the
//! stored string.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{LedgerError, LedgerResult};
use crate::models::ValidationError;

/// Reject passwords shorter than the configured minimum
pub fn validate_password(password: &str, min_len: usize) -> Result<(), ValidationError> {
    if password.chars().count() < min_len {
        return Err(ValidationError::PasswordTooShort { min: min_len });
    }
    Ok(())
}

/// Hash a password with a fresh random salt
pub fn hash_password(password: &str) -> LedgerResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| LedgerError::Crypto(format!("Password hashing failed: {}", e)))?;

    Ok(hash.to_string())
}

/// Check a password against a stored PHC string
///
/// Returns `Ok(false)` on mismatch and an error only if the stored hash is
/// unreadable.
pub fn verify_password(password: &str, stored_hash: &str) -> LedgerResult<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| LedgerError::Crypto(format!("Invalid stored password hash: {}", e)))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(LedgerError::Crypto(format!(
            "Password verification failed: {}",
            e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_phc_string() {
        let hash = hash_password("password12345").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("password12345"));
    }

    #[test]
    fn test_verify_correct_password() {
        let hash = hash_password("password12345").unwrap();
        assert!(verify_password("password12345", &hash).unwrap());
    }

    #[test]
    fn test_verify_wrong_password() {
        let hash = hash_password("password3q").unwrap();
        assert!(!verify_password("password2", &hash).unwrap());
    }

    #[test]
    fn test_same_password_different_salts() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_stored_hash() {
        assert!(matches!(
            verify_password("anything", "not-a-hash"),
            Err(LedgerError::Crypto(_))
        ));
    }

    #[test]
    fn test_minimum_length() {
        assert_eq!(
            validate_password("123", 5),
            Err(ValidationError::PasswordTooShort { min: 5 })
        );
        assert!(validate_password("12345", 5).is_ok());
    }
}
