//! Username/password pairs presented at login.
//!
//! They arrive either as an OAuth2 password-request form body or as an
//! HTTP Basic `Authorization` header.

use std::fmt;

use axum::http::HeaderMap;
use headers::{Authorization, HeaderMapExt, authorization::Basic};
use serde::Deserialize;

use crate::prelude::*;

/// Login credentials. Extra OAuth2 form fields such as `grant_type` or
/// `scope` are accepted and ignored.
#[derive(Clone, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"REDACTED")
            .finish()
    }
}

impl LoginForm {
    /// Reads credentials from an `Authorization: Basic` header.
    pub fn from_basic(headers: &HeaderMap) -> Result<Self> {
        let basic = headers
            .typed_get::<Authorization<Basic>>()
            .ok_or(Error::MissingCredentials)?;
        Ok(Self {
            username: String::from(basic.username()),
            password: String::from(basic.password()),
        })
    }

    /// Rejects credentials with nothing to check.
    pub fn require_complete(self) -> Result<Self> {
        if self.username.is_empty() || self.password.is_empty() {
            return Err(Error::MissingCredentials);
        }
        Ok(self)
    }
}
