//! JWT signing and verification.
//!
//! [`Keys`] holds the key pair and the algorithm for one deployment. It is
//! built once at startup from configuration and handed to
//! [`SignedTokens`](crate::signed::SignedTokens); nothing here reads the
//! environment.
//!
//! # Examples
//!
//! ```rust
//! use journal_auth::jwt::Keys;
//! use jsonwebtoken::Algorithm;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
//! struct Claims {
//!     sub: String,
//!     exp: i64,
//! }
//!
//! let keys = Keys::new(b"MySuperSecret", Algorithm::HS256).unwrap();
//! let claims = Claims { sub: "alice".to_string(), exp: 4118335200 };
//!
//! let token = keys.jwt_encode(&claims).unwrap();
//! assert_eq!(token.split('.').count(), 3);
//! assert_eq!(keys.jwt_decode::<Claims>(&token).unwrap().claims, claims);
//! ```

use std::fmt;

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode,
    errors::ErrorKind,
};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::ISS;
use crate::prelude::*;

/// Symmetric key pair plus the single algorithm it is used with.
#[derive(Clone)]
pub struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    algorithm: Algorithm,
}

impl fmt::Debug for Keys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keys")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

impl Keys {
    /// Creates a key pair from a shared secret.
    ///
    /// Only the HMAC family is accepted, since the same secret both signs
    /// and verifies.
    pub fn new(secret: &[u8], algorithm: Algorithm) -> Result<Self> {
        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(Error::UnsupportedAlgorithm(algorithm));
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            algorithm,
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_issuer(&[ISS]);
        validation
    }

    /// Signs `body` as the payload of a compact JWT.
    pub fn jwt_encode<T>(&self, body: &T) -> Result<String>
    where
        T: Serialize,
    {
        let header = Header::new(self.algorithm);
        Ok(encode(&header, body, &self.encoding)?)
    }

    /// Verifies signature, algorithm, issuer and expiry, then returns the claims.
    ///
    /// An expired token yields [`Error::TokenExpired`]; every other failure
    /// yields [`Error::TokenMalformed`].
    pub fn jwt_decode<T>(&self, token: &str) -> Result<TokenData<T>>
    where
        T: DeserializeOwned,
    {
        decode(token, &self.decoding, &self.validation()).map_err(|err| {
            debug!("Failed to decode jwt token {err}");
            match err.kind() {
                ErrorKind::ExpiredSignature => Error::TokenExpired,
                _ => Error::TokenMalformed,
            }
        })
    }
}
