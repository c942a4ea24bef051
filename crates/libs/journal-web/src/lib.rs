//! Web utilities and middleware for journald.
//!
//! Maps authentication failures to HTTP responses, resolves the bearer token
//! a request presents and turns it into an authorized [`ctx::Ctx`].

pub mod credentials;
pub mod ctx;
pub mod error;
pub mod mw_auth;
pub mod prelude;
