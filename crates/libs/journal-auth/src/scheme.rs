//! The token scheme a deployment runs with.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::account::Account;
use crate::constant_time::constant_time_str_eq;
use crate::derived::DerivedTokens;
use crate::prelude::*;
use crate::signed::SignedTokens;
use crate::store::CredentialStore;

/// Which kind of token a deployment issues, as named in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenSchemeKind {
    Derived,
    #[default]
    Signed,
}

impl fmt::Display for TokenSchemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Derived => write!(f, "derived"),
            Self::Signed => write!(f, "signed"),
        }
    }
}

impl FromStr for TokenSchemeKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "derived" => Ok(Self::Derived),
            "signed" | "jwt" => Ok(Self::Signed),
            other => Err(format!("unknown token scheme '{other}'")),
        }
    }
}

/// Issues and validates bearer tokens. Exactly one variant is active per
/// deployment; tokens of the other kind never validate.
#[derive(Debug, Clone)]
pub enum TokenScheme {
    Derived(DerivedTokens),
    Signed(SignedTokens),
}

impl TokenScheme {
    pub fn kind(&self) -> TokenSchemeKind {
        match self {
            Self::Derived(_) => TokenSchemeKind::Derived,
            Self::Signed(_) => TokenSchemeKind::Signed,
        }
    }

    pub fn issue(&self, account: &Account) -> Result<String> {
        match self {
            Self::Derived(tokens) => Ok(tokens.issue(account)),
            Self::Signed(tokens) => tokens.issue(account),
        }
    }

    /// Resolves the account a presented token belongs to.
    ///
    /// Derived tokens cannot be resolved without the username they were
    /// issued for. A signed token resolves on its own; when a username is
    /// presented as well it must name the token's subject.
    pub fn validate(
        &self,
        store: &CredentialStore,
        token: &str,
        username: Option<&str>,
    ) -> Result<Account> {
        match self {
            Self::Derived(tokens) => {
                let username = username.ok_or(Error::InvalidCredentials)?;
                tokens.validate(store, username, token)
            }
            Self::Signed(tokens) => {
                let account = tokens.validate(store, token)?;
                match username {
                    Some(username) if !constant_time_str_eq(&account.username, username) => {
                        Err(Error::InvalidCredentials)
                    }
                    _ => Ok(account),
                }
            }
        }
    }
}

impl From<DerivedTokens> for TokenScheme {
    fn from(value: DerivedTokens) -> Self {
        Self::Derived(value)
    }
}

impl From<SignedTokens> for TokenScheme {
    fn from(value: SignedTokens) -> Self {
        Self::Signed(value)
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::Algorithm;

    use super::*;
    use crate::account::Enrollment;
    use crate::signed::DEFAULT_TOKEN_TTL;

    fn signed() -> TokenScheme {
        SignedTokens::new(b"secret", Algorithm::HS256, DEFAULT_TOKEN_TTL)
            .unwrap()
            .into()
    }

    fn store() -> (CredentialStore, Account) {
        let store = CredentialStore::new();
        let alice = store
            .enroll(Enrollment::new("alice", "p@ss", "s3cret"))
            .unwrap();
        store
            .enroll(Enrollment::new("bob", "hunter2", "b0b"))
            .unwrap();
        (store, alice)
    }

    #[test]
    fn parse_kind() {
        assert_eq!("derived".parse::<TokenSchemeKind>(), Ok(TokenSchemeKind::Derived));
        assert_eq!(" Signed ".parse::<TokenSchemeKind>(), Ok(TokenSchemeKind::Signed));
        assert_eq!("jwt".parse::<TokenSchemeKind>(), Ok(TokenSchemeKind::Signed));
        assert!("basic".parse::<TokenSchemeKind>().is_err());
        assert_eq!(TokenSchemeKind::default(), TokenSchemeKind::Signed);
        assert_eq!(TokenSchemeKind::Derived.to_string(), "derived");
    }

    #[test]
    fn derived_needs_the_username() -> Result<()> {
        let (store, alice) = store();
        let scheme = TokenScheme::from(DerivedTokens::new());
        let token = scheme.issue(&alice)?;

        assert_eq!(scheme.validate(&store, &token, Some("alice"))?, alice);
        assert!(matches!(
            scheme.validate(&store, &token, None),
            Err(Error::InvalidCredentials)
        ));
        assert!(matches!(
            scheme.validate(&store, &token, Some("bob")),
            Err(Error::InvalidCredentials)
        ));
        Ok(())
    }

    #[test]
    fn signed_username_must_match_subject() -> Result<()> {
        let (store, alice) = store();
        let scheme = signed();
        let token = scheme.issue(&alice)?;

        assert_eq!(scheme.validate(&store, &token, None)?, alice);
        assert_eq!(scheme.validate(&store, &token, Some("alice"))?, alice);
        assert!(matches!(
            scheme.validate(&store, &token, Some("bob")),
            Err(Error::InvalidCredentials)
        ));
        Ok(())
    }

    #[test]
    fn schemes_do_not_accept_each_others_tokens() -> Result<()> {
        let (store, alice) = store();
        let derived = TokenScheme::from(DerivedTokens::new());
        let signed = signed();

        let derived_token = derived.issue(&alice)?;
        let signed_token = signed.issue(&alice)?;
        assert!(matches!(
            signed.validate(&store, &derived_token, Some("alice")),
            Err(Error::TokenMalformed)
        ));
        assert!(matches!(
            derived.validate(&store, &signed_token, Some("alice")),
            Err(Error::InvalidCredentials)
        ));
        assert_eq!(derived.kind(), TokenSchemeKind::Derived);
        assert_eq!(signed.kind(), TokenSchemeKind::Signed);
        Ok(())
    }
}
