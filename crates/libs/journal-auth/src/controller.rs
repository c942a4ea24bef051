//! Request-level orchestration of enrollment, login and protected access.
//!
//! The controller keeps no per-request state: every call ends either with a
//! value or with a typed [`Error`] for the HTTP layer to map.

use std::sync::Arc;

use tracing::{debug, info};

use crate::account::{Account, EnrolledAccount, Enrollment};
use crate::auth_body::AuthBody;
use crate::prelude::*;
use crate::scheme::{TokenScheme, TokenSchemeKind};
use crate::secret_hash::is_secret_valid;
use crate::store::CredentialStore;

#[derive(Debug, Clone)]
pub struct AccessController {
    store: CredentialStore,
    scheme: Arc<TokenScheme>,
}

impl AccessController {
    pub fn new(store: CredentialStore, scheme: impl Into<TokenScheme>) -> Self {
        Self {
            store,
            scheme: Arc::new(scheme.into()),
        }
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    pub fn scheme_kind(&self) -> TokenSchemeKind {
        self.scheme.kind()
    }

    pub fn enroll(&self, enrollment: Enrollment) -> Result<EnrolledAccount> {
        let account = self.store.enroll(enrollment)?;
        Ok(EnrolledAccount::from(&account))
    }

    /// Checks a username/password pair and issues a token for it.
    ///
    /// Unknown usernames yield [`Error::NotFound`], a wrong password
    /// [`Error::InvalidCredentials`].
    pub fn login(&self, username: &str, password: &str) -> Result<AuthBody> {
        let account = self.store.lookup(username)?;
        if !is_secret_valid(password, &account.password_hash) {
            debug!("Wrong password for {}", account.username);
            return Err(Error::InvalidCredentials);
        }
        let token = self.scheme.issue(&account)?;
        info!("Issued {} token for {}", self.scheme.kind(), account.username);
        Ok(AuthBody::new(token))
    }

    /// Resolves the account a presented bearer token grants access to.
    pub fn authorize(&self, token: &str, username: Option<&str>) -> Result<Account> {
        if token.is_empty() {
            return Err(Error::TokenMissing);
        }
        self.scheme.validate(&self.store, token, username)
    }
}
