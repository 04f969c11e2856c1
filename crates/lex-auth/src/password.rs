//! Argon2id password hashing.
//!
//! Hashes are PHC strings (`$argon2id$v=19$m=…`) carrying their own salt and
//! parameters, so verification needs nothing but the stored string.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

use crate::error::AuthError;

/// Hash a password with a fresh random salt.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if Argon2 rejects the input.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswordHash(e.to_string()))
}

/// Check a password against a stored PHC string.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` when `phc` is not a parseable hash.
/// A well-formed hash that does not match yields `Ok(false)`.
pub fn verify_password(password: &str, phc: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(phc).map_err(|e| AuthError::PasswordHash(e.to_string()))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::PasswordHash(e.to_string())),
    }
}

/// # Errors
///
/// Returns `AuthError::WeakPassword` (pt-BR message) when the password is
/// shorter than `min_len` characters or blank.
pub fn check_password_policy(password: &str, min_len: usize) -> Result<(), AuthError> {
    if password.trim().is_empty() {
        return Err(AuthError::WeakPassword("Senha não informada".into()));
    }
    if password.chars().count() < min_len {
        return Err(AuthError::WeakPassword(format!(
            "A senha deve ter pelo menos {min_len} caracteres"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("wrong horse", &hash).unwrap());
    }

    #[test]
    fn salts_differ() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(matches!(
            verify_password("x", "not-a-phc-string"),
            Err(AuthError::PasswordHash(_))
        ));
    }

    #[rstest]
    #[case("12345678", true)]
    #[case("açúcar!!", true)]
    #[case("1234567", false)]
    #[case("        ", false)]
    #[case("", false)]
    fn policy(#[case] password: &str, #[case] ok: bool) {
        assert_eq!(check_password_policy(password, 8).is_ok(), ok, "{password:?}");
    }
}
