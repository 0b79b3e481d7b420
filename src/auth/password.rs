//! Password hashing and verification.
//!
//! One-way adaptive bcrypt hashing with cost factor 10. Plaintext
//! passwords are never logged and never stored.

use crate::error::{ApiError, Result};

/// bcrypt cost factor.
pub const BCRYPT_COST: u32 = 10;

pub fn hash_password(plaintext: &str) -> Result<String> {
    bcrypt::hash(plaintext, BCRYPT_COST)
        .map_err(|e| ApiError::internal(format!("password hashing failed: {e}")))
}

/// Fails closed: a malformed stored hash counts as a mismatch.
#[must_use]
pub fn verify_password(plaintext: &str, hash: &str) -> bool {
    bcrypt::verify(plaintext, hash).unwrap_or(false)
}
