//! Derived-hash bearer tokens.
//!
//! The token is the lowercase hex SHA-256 of `username + "." + password_hash`.
//! Nothing is stored per token: validation recomputes it from the account.
//! Re-enrolling with a new password changes the hash and with it every
//! token issued before.

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::account::Account;
use crate::constant_time::constant_time_str_eq;
use crate::prelude::*;
use crate::store::CredentialStore;

const SEPARATOR: &str = ".";

#[derive(Debug, Clone, Copy, Default)]
pub struct DerivedTokens;

/// Hex SHA-256 over `username.password_hash`.
fn generate_hash(username: &str, password_hash: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(username.as_bytes());
    hasher.update(SEPARATOR.as_bytes());
    hasher.update(password_hash.as_bytes());
    format!("{:x}", hasher.finalize())
}

impl DerivedTokens {
    pub fn new() -> Self {
        Self
    }

    pub fn issue(&self, account: &Account) -> String {
        generate_hash(&account.username, &account.password_hash)
    }

    /// Resolves `username` and checks `presented` against its current token.
    ///
    /// An unknown username and a wrong token both yield
    /// [`Error::InvalidCredentials`].
    pub fn validate(
        &self,
        store: &CredentialStore,
        username: &str,
        presented: &str,
    ) -> Result<Account> {
        let account = match store.lookup(username) {
            Ok(account) => account,
            Err(Error::NotFound) => {
                debug!("Derived token presented for an unknown account");
                return Err(Error::InvalidCredentials);
            }
            Err(err) => return Err(err),
        };

        if constant_time_str_eq(&self.issue(&account), presented) {
            Ok(account)
        } else {
            debug!("Derived token mismatch for {}", account.username);
            Err(Error::InvalidCredentials)
        }
    }
}
