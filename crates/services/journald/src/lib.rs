//! Journal service (journald).
//!
//! HTTP front end over the `journal_auth` core:
//!
//! - `POST /v1/journal` enrolls a journal account
//! - `POST /v1/login` (form) and `GET /v1/login` (HTTP Basic) issue a bearer token
//! - `GET /v1/journal` and `GET /v1/journal/{username}` return the journal of
//!   the account the token belongs to

pub mod api;
pub mod config;
pub mod error;
pub mod prelude;
