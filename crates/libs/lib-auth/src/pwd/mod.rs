//! # Password Hashing
//!
//! Password hashing and verification using Argon2.
//!
//! Hashes are salted per call, so hashing the same plaintext twice yields
//! different strings. Plaintext is never stored and never reconstructed;
//! comparison goes one way through the verifier.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("Password must be at least {} characters long", MIN_PASSWORD_LEN)]
    TooShort,

    #[error("Failed to hash password")]
    FailToHash,

    #[error("Stored password hash is not parseable")]
    InvalidHash,
}

/// Hash a password with a freshly generated salt.
pub fn hash_password(password: &str) -> Result<String, Error> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(Error::TooShort);
    }

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| Error::FailToHash)?
        .to_string();

    Ok(password_hash)
}

/// Verify a plaintext password against a stored hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, Error> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| Error::InvalidHash)?;

    let argon2 = Argon2::default();

    Ok(argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
