//! Error types for the journal service.
//!
//! Covers startup: configuration loading, key setup and binding the
//! listener. Request-level failures are `journal_web` errors.

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Auth(#[from] journal_auth::error::Error),

    #[error("Env Variable '{0}' missing")]
    MissingEnv(&'static str),

    #[error("Env Variable '{var}' is invalid: {reason}")]
    InvalidEnv { var: &'static str, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
