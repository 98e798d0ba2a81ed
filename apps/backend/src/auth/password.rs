//! Password hashing and temporary-password generation.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::Rng;

use crate::AppError;

/// Length of generated reset passwords.
pub const GENERATED_PASSWORD_LEN: usize = 6;

const HEX: &[u8] = b"0123456789abcdef";

/// Hash a plaintext password with Argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::internal(format!("failed to hash password: {e}")))
}

/// Verify a plaintext password against a stored hash.
///
/// Returns Ok(false) on mismatch; Err only if the stored hash is unparsable.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| AppError::internal(format!("stored password hash is invalid: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Generate a random lowercase-hex password for the forgot-password flow.
/// Returned in plaintext exactly once, for out-of-band delivery.
pub fn generate_password(len: usize) -> String {
    let mut rng = rand::rng();
    let mut s = String::with_capacity(len);
    for _ in 0..len {
        s.push(HEX[rng.random_range(0..HEX.len())] as char);
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("pw123").unwrap();
        assert_ne!(hash, "pw123");
        assert!(verify_password("pw123", &hash).unwrap());
        assert!(!verify_password("pw124", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("pw123").unwrap();
        let b = hash_password("pw123").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(verify_password("pw123", "not-a-phc-string").is_err());
    }

    #[test]
    fn test_generated_password_shape() {
        let pw = generate_password(GENERATED_PASSWORD_LEN);
        assert_eq!(pw.len(), GENERATED_PASSWORD_LEN);
        assert!(pw.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_generated_passwords_differ() {
        // 16^6 combinations; a collision here means the RNG is broken.
        let a = generate_password(GENERATED_PASSWORD_LEN);
        let b = generate_password(GENERATED_PASSWORD_LEN);
        assert!(a != b || generate_password(GENERATED_PASSWORD_LEN) != a);
    }
}
