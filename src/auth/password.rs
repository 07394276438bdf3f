//! Password hashing for mediabin.
//!
//! Uses Argon2id with a random per-password salt.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand_core::OsRng;
use thiserror::Error;

/// Password-related errors.
#[derive(Error, Debug)]
pub enum PasswordError {
    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    HashError(String),

    /// Password hash is invalid.
    #[error("invalid password hash format")]
    InvalidHash,

    /// Password verification failed (wrong password).
    #[error("password verification failed")]
    VerificationFailed,
}

/// Hash a password using Argon2id.
///
/// Returns a PHC-formatted hash string that includes the salt and parameters.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verify a password against a stored hash.
///
/// Returns `Ok(())` if the password matches.
pub fn verify_password(password: &str, hash: &str) -> Result<(), PasswordError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHash)?;

    // Parameters come from the parsed hash, not the default hasher
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| PasswordError::VerificationFailed)
}
