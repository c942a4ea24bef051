//! Signed-claims bearer tokens.
//!
//! A token is a compact JWT whose claims carry the account's username as
//! `sub` and an expiry. It is self-contained: validation needs only the
//! signing key, plus a store lookup to make sure the subject still exists.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::Algorithm;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::ISS;
use crate::account::Account;
use crate::jwt::Keys;
use crate::prelude::*;
use crate::store::CredentialStore;

pub const DEFAULT_TOKEN_TTL: TimeDelta = TimeDelta::seconds(300);

/// Claims carried by a signed token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    /// Subject (username).
    pub sub: String,
    /// Issuer.
    pub iss: String,
    /// Expiration time.
    pub exp: i64,
    /// Issued at time.
    pub iat: i64,
    /// JWT ID.
    pub jti: Uuid,
}

impl AuthToken {
    pub fn new(username: &str, token_duration: TimeDelta) -> Result<Self> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(token_duration)
            .ok_or(Error::TokenExpiryOutOfRange)?;

        Ok(Self {
            sub: String::from(username),
            iss: String::from(ISS),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4(),
        })
    }

    /// A token is valid only while its expiry lies strictly in the future.
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp <= now
    }
}

#[derive(Debug, Clone)]
pub struct SignedTokens {
    keys: Keys,
    ttl: TimeDelta,
}

impl SignedTokens {
    pub fn new(secret: &[u8], algorithm: Algorithm, ttl: TimeDelta) -> Result<Self> {
        Ok(Self {
            keys: Keys::new(secret, algorithm)?,
            ttl,
        })
    }

    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    pub fn algorithm(&self) -> Algorithm {
        self.keys.algorithm()
    }

    pub fn issue(&self, account: &Account) -> Result<String> {
        self.issue_with_ttl(account, self.ttl)
    }

    pub fn issue_with_ttl(&self, account: &Account, ttl: TimeDelta) -> Result<String> {
        let claims = AuthToken::new(&account.username, ttl)?;
        self.keys.jwt_encode(&claims)
    }

    /// Verifies a presented token and returns its claims.
    pub fn decode(&self, token: &str) -> Result<AuthToken> {
        let claims = self.keys.jwt_decode::<AuthToken>(token)?.claims;
        if claims.is_expired_at(Utc::now().timestamp()) {
            return Err(Error::TokenExpired);
        }
        Ok(claims)
    }

    /// Verifies a presented token and resolves its subject.
    ///
    /// A cryptographically valid token whose account has since disappeared
    /// yields [`Error::UnknownSubject`].
    pub fn validate(&self, store: &CredentialStore, token: &str) -> Result<Account> {
        let claims = self.decode(token)?;
        store.lookup(&claims.sub).map_err(|err| match err {
            Error::NotFound => {
                debug!("Signed token subject {} no longer exists", claims.sub);
                Error::UnknownSubject
            }
            err => err,
        })
    }
}
