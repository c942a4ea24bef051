//! Service configuration.
//!
//! Settings come from an optional TOML file named by `JOURNALD_CONFIG`,
//! then from individual environment variables, which win over the file.
//! The signing secret is only ever read from `JWT_SECRET`.
//!
//! ```toml
//! bind = "0.0.0.0:3000"
//! token_scheme = "signed"
//! token_ttl_secs = 300
//! jwt_algorithm = "HS256"
//!
//! [[seed]]
//! username = "alice"
//! password = "wonderland"
//! secrets = "down the rabbit hole"
//! ```

use std::fmt::{self, Display};
use std::net::SocketAddr;
use std::path::Path;
use std::str::FromStr;

use chrono::TimeDelta;
use journal_auth::{
    Algorithm,
    account::Enrollment,
    controller::AccessController,
    derived::DerivedTokens,
    scheme::{TokenScheme, TokenSchemeKind},
    signed::SignedTokens,
    store::CredentialStore,
};
use serde::Deserialize;

use crate::prelude::*;

pub const CONFIG_PATH_ENV: &str = "JOURNALD_CONFIG";
pub const BIND_ENV: &str = "JOURNALD_BIND";
pub const TOKEN_SCHEME_ENV: &str = "JOURNALD_TOKEN_SCHEME";
pub const TOKEN_TTL_ENV: &str = "JOURNALD_TOKEN_TTL";
pub const JWT_ALGORITHM_ENV: &str = "JWT_ALGORITHM";
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

const DEFAULT_TOKEN_TTL_SECS: i64 = 300;

/// Key material for signed tokens.
#[derive(Clone)]
pub struct JwtSecret(String);

impl JwtSecret {
    pub fn new(secret: impl Into<String>) -> Result<Self> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(Error::InvalidEnv {
                var: JWT_SECRET_ENV,
                reason: String::from("secret is empty"),
            });
        }
        Ok(Self(secret))
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for JwtSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "REDACTED")
    }
}

impl Display for JwtSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "REDACTED")
    }
}

/// Everything journald needs to start.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JournalConfig {
    /// Address the API listens on.
    pub bind: SocketAddr,
    pub token_scheme: TokenSchemeKind,
    /// Lifetime of signed tokens, in seconds.
    pub token_ttl_secs: i64,
    /// JWS algorithm name. Only the HMAC family is accepted.
    pub jwt_algorithm: String,
    #[serde(skip)]
    pub jwt_secret: Option<JwtSecret>,
    /// Accounts enrolled before the listener opens.
    pub seed: Vec<Enrollment>,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            token_scheme: TokenSchemeKind::default(),
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            jwt_algorithm: String::from("HS256"),
            jwt_secret: None,
            seed: Vec::new(),
        }
    }
}

fn parse_env<T>(var: &'static str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    value.trim().parse().map_err(|err: T::Err| Error::InvalidEnv {
        var,
        reason: err.to_string(),
    })
}

impl JournalConfig {
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Loads the configuration file named by `JOURNALD_CONFIG`, if any, and
    /// applies environment overrides on top.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use journald::config::JournalConfig;
    ///
    /// let config = JournalConfig::from_env()?;
    /// let controller = config.controller()?;
    /// # Ok::<(), journald::error::Error>(())
    /// ```
    pub fn from_env() -> Result<Self> {
        let config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        config.with_overrides(|var| std::env::var(var).ok())
    }

    /// Applies overrides from `lookup`, keyed by environment variable name.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup(BIND_ENV) {
            self.bind = parse_env(BIND_ENV, &bind)?;
        }
        if let Some(scheme) = lookup(TOKEN_SCHEME_ENV) {
            self.token_scheme = parse_env(TOKEN_SCHEME_ENV, &scheme)?;
        }
        if let Some(ttl) = lookup(TOKEN_TTL_ENV) {
            self.token_ttl_secs = parse_env(TOKEN_TTL_ENV, &ttl)?;
        }
        if let Some(algorithm) = lookup(JWT_ALGORITHM_ENV) {
            self.jwt_algorithm = algorithm.trim().to_string();
        }
        if let Some(secret) = lookup(JWT_SECRET_ENV) {
            self.jwt_secret = Some(JwtSecret::new(secret)?);
        }
        Ok(self)
    }

    pub fn algorithm(&self) -> Result<Algorithm> {
        Algorithm::from_str(&self.jwt_algorithm).map_err(|_| {
            Error::InvalidConfig(format!("unknown JWT algorithm '{}'", self.jwt_algorithm))
        })
    }

    pub fn token_ttl(&self) -> Result<TimeDelta> {
        if self.token_ttl_secs <= 0 {
            return Err(Error::InvalidConfig(format!(
                "token ttl must be positive, got {}",
                self.token_ttl_secs
            )));
        }
        TimeDelta::try_seconds(self.token_ttl_secs).ok_or_else(|| {
            Error::InvalidConfig(format!("token ttl {} is too large", self.token_ttl_secs))
        })
    }

    /// Builds the configured token scheme.
    pub fn token_scheme(&self) -> Result<TokenScheme> {
        match self.token_scheme {
            TokenSchemeKind::Derived => Ok(DerivedTokens::new().into()),
            TokenSchemeKind::Signed => {
                let secret = self
                    .jwt_secret
                    .as_ref()
                    .ok_or(Error::MissingEnv(JWT_SECRET_ENV))?;
                let tokens =
                    SignedTokens::new(secret.as_bytes(), self.algorithm()?, self.token_ttl()?)?;
                Ok(tokens.into())
            }
        }
    }

    /// Builds the access controller over a store holding the seed accounts.
    pub fn controller(&self) -> Result<AccessController> {
        let scheme = self.token_scheme()?;
        let store = CredentialStore::with_seed(self.seed.iter().cloned())?;
        Ok(AccessController::new(store, scheme))
    }
}

impl Display for JournalConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bind={} scheme={} ttl={}s algorithm={} secret={} seed_accounts={}",
            self.bind,
            self.token_scheme,
            self.token_ttl_secs,
            self.jwt_algorithm,
            if self.jwt_secret.is_some() {
                "REDACTED"
            } else {
                "unset"
            },
            self.seed.len()
        )
    }
}
