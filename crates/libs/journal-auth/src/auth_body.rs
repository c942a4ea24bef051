//! Login response body.

use serde::{Deserialize, Serialize};

use super::CONNECTION_TOKEN_TYPE;

/// OAuth2-style token response.
///
/// ```json
/// {
///   "access_token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///   "token_type": "bearer"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuthBody {
    pub access_token: String,
    pub token_type: String,
}

impl AuthBody {
    /// ```rust
    /// use journal_auth::auth_body::AuthBody;
    ///
    /// let response = AuthBody::new("some_token".to_string());
    /// assert_eq!(response.token_type, "bearer");
    /// ```
    pub fn new(access_token: String) -> Self {
        Self {
            access_token,
            token_type: String::from(CONNECTION_TOKEN_TYPE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_oauth2_field_names() {
        let json = serde_json::to_value(AuthBody::new(String::from("abc"))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "access_token": "abc", "token_type": "bearer" })
        );
    }
}
