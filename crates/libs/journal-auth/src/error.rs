//! Errors produced by the authentication core.
//!
//! None of the messages carry passwords, password hashes or signing keys.

#[derive(Debug, thiserror::Error, Clone)]
pub enum Error {
    #[error("Account not found")]
    NotFound,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Account already exists")]
    DuplicateAccount,

    #[error("Token Missing")]
    TokenMissing,
    #[error("Token Expired")]
    TokenExpired,
    #[error("Token Malformed")]
    TokenMalformed,
    #[error("Token subject no longer exists")]
    UnknownSubject,
    #[error("Token expiry out of range")]
    TokenExpiryOutOfRange,
    #[error("Unsupported signing algorithm {0:?}")]
    UnsupportedAlgorithm(jsonwebtoken::Algorithm),
    #[error(transparent)]
    TokenCreation(#[from] jsonwebtoken::errors::Error),

    #[error("Error hashing password {0}")]
    PasswordHash(argon2::password_hash::Error),
}
