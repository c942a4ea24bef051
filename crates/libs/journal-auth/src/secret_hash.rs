//! Password hashing and verification using Argon2.
//!
//! Enrollment stores the output of [`generate_secret_hash`]; login checks a
//! presented password with [`is_secret_valid`].
//!
//! # Examples
//!
//! ```rust
//! use journal_auth::secret_hash::{generate_secret_hash, is_secret_valid};
//!
//! let hash = generate_secret_hash("p@ss").unwrap();
//! assert!(is_secret_valid("p@ss", &hash));
//! assert!(!is_secret_valid("wrong", &hash));
//! ```

use argon2::{
    Argon2, PasswordHasher, PasswordVerifier,
    password_hash::{self, PasswordHash, SaltString},
};
use rand::rngs::OsRng;
use tracing::warn;

use crate::prelude::*;

/// Hashes a raw password with a freshly generated salt.
///
/// The result is a PHC string carrying algorithm, parameters and salt, so two
/// calls with the same input produce different strings that both verify.
pub fn generate_secret_hash(pw: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    Ok(argon2.hash_password(pw.as_bytes(), &salt)?.to_string())
}

/// Verifies a raw password against a stored PHC hash.
///
/// A stored hash that cannot be parsed is treated as a failed verification.
pub fn is_secret_valid(pw: &str, hash: &str) -> bool {
    let hash = match PasswordHash::new(hash) {
        Ok(hash) => hash,
        Err(err) => {
            warn!("Stored password hash could not be parsed: {err}");
            return false;
        }
    };

    Argon2::default()
        .verify_password(pw.as_bytes(), &hash)
        .is_ok()
}

impl From<password_hash::Error> for Error {
    fn from(value: password_hash::Error) -> Self {
        Self::PasswordHash(value)
    }
}
