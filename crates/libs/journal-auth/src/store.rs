//! In-memory credential store.
//!
//! The store is an explicit object created at startup and handed to the
//! [`AccessController`](crate::controller::AccessController); clones share
//! the same accounts. Usernames are unique and always compared in constant
//! time.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info};

use crate::account::{Account, Enrollment};
use crate::constant_time::constant_time_str_eq;
use crate::prelude::*;
use crate::secret_hash::generate_secret_hash;

#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    accounts: Arc<RwLock<Vec<Account>>>,
}

/// Index of the first account named `username`.
///
/// Every stored username is compared, whether or not a match was already
/// found.
fn position(accounts: &[Account], username: &str) -> Option<usize> {
    let mut found = None;
    for (index, account) in accounts.iter().enumerate() {
        let matches = constant_time_str_eq(&account.username, username);
        if matches && found.is_none() {
            found = Some(index);
        }
    }
    found
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store and enrolls every seed account into it.
    pub fn with_seed<I>(seed: I) -> Result<Self>
    where
        I: IntoIterator<Item = Enrollment>,
    {
        let store = Self::new();
        for enrollment in seed {
            store.enroll(enrollment)?;
        }
        Ok(store)
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Account>> {
        self.accounts.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Account>> {
        self.accounts.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Hashes the password and stores a new account.
    ///
    /// The duplicate check and the insert happen under one write lock, so of
    /// several concurrent enrollments for a username exactly one succeeds.
    pub fn enroll(&self, enrollment: Enrollment) -> Result<Account> {
        let password_hash = generate_secret_hash(&enrollment.password)?;
        let account = Account {
            username: enrollment.username,
            password_hash,
            secrets: enrollment.secrets,
            email: enrollment.email,
        };

        let mut accounts = self.write();
        if position(&accounts, &account.username).is_some() {
            debug!("Rejected duplicate enrollment for {}", account.username);
            return Err(Error::DuplicateAccount);
        }
        accounts.push(account.clone());
        info!("Enrolled account {}", account.username);
        Ok(account)
    }

    pub fn lookup(&self, username: &str) -> Result<Account> {
        let accounts = self.read();
        position(&accounts, username)
            .map(|index| accounts[index].clone())
            .ok_or(Error::NotFound)
    }

    pub fn remove(&self, username: &str) -> Result<Account> {
        let mut accounts = self.write();
        let index = position(&accounts, username).ok_or(Error::NotFound)?;
        let account = accounts.remove(index);
        info!("Removed account {}", account.username);
        Ok(account)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}
