//! Authentication core for journald.
//!
//! Accounts are enrolled into a [`store::CredentialStore`] with an Argon2
//! password hash. A successful login yields a bearer token from one of two
//! [`scheme::TokenScheme`]s, chosen once per deployment:
//!
//! - [`derived::DerivedTokens`]: SHA-256 of `username.password_hash`,
//!   recomputed on every request and invalidated by a password change.
//! - [`signed::SignedTokens`]: a signed JWT carrying subject and expiry.
//!
//! [`controller::AccessController`] ties the pieces together for the HTTP
//! front end.

pub mod account;
pub mod auth_body;
pub mod constant_time;
pub mod controller;
pub mod derived;
pub mod error;
pub mod jwt;
pub mod prelude;
pub mod scheme;
pub mod secret_hash;
pub mod signed;
pub mod store;

pub use jsonwebtoken::Algorithm;

pub const CONNECTION_TOKEN_TYPE: &str = "bearer";
pub const ISS: &str = "journald";
pub const AUTH_HEADER: &str = "Authorization";
pub const AUTH_HEADER_PREFIX: &str = "Bearer ";
