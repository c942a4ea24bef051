//! Journal accounts and the shapes they take on the wire.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An enrolled account as held by the credential store.
///
/// `password_hash` is an Argon2 PHC string; the raw password is never kept.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    pub username: String,
    pub password_hash: String,
    pub secrets: String,
    pub email: Option<String>,
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("username", &self.username)
            .field("password_hash", &"REDACTED")
            .field("secrets", &"REDACTED")
            .field("email", &self.email)
            .finish()
    }
}

/// Enrollment request: the only place a raw password enters the core.
#[derive(Clone, Deserialize, Serialize)]
pub struct Enrollment {
    pub username: String,
    pub password: String,
    pub secrets: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Enrollment {
    pub fn new(username: &str, password: &str, secrets: &str) -> Self {
        Self {
            username: String::from(username),
            password: String::from(password),
            secrets: String::from(secrets),
            email: None,
        }
    }
}

impl fmt::Debug for Enrollment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Enrollment")
            .field("username", &self.username)
            .field("password", &"REDACTED")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Response to a successful enrollment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EnrolledAccount {
    pub username: String,
}

/// What a protected request gets to see of an account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AccountView {
    pub username: String,
    pub secrets: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl From<&Account> for EnrolledAccount {
    fn from(value: &Account) -> Self {
        Self {
            username: value.username.clone(),
        }
    }
}

impl From<Account> for AccountView {
    fn from(value: Account) -> Self {
        Self {
            username: value.username,
            secrets: value.secrets,
            email: value.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account {
            username: String::from("alice"),
            password_hash: String::from("$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2g"),
            secrets: String::from("s3cret"),
            email: None,
        }
    }

    #[test]
    fn debug_output_redacts_credentials() {
        let output = format!("{:?}", account());
        assert!(output.contains("alice"));
        assert!(!output.contains("argon2"));
        assert!(!output.contains("s3cret"));

        let output = format!("{:?}", Enrollment::new("alice", "p@ss", "s3cret"));
        assert!(!output.contains("p@ss"));
    }

    #[test]
    fn view_excludes_password_hash() {
        let view = AccountView::from(account());
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["username"], "alice");
        assert_eq!(json["secrets"], "s3cret");
        assert!(json.get("password_hash").is_none());
        assert!(json.get("password").is_none());
        assert!(json.get("email").is_none());
    }

    #[test]
    fn enrollment_email_is_optional() {
        let enrollment: Enrollment =
            serde_json::from_str(r#"{"username":"bob","password":"pw","secrets":"x"}"#).unwrap();
        assert_eq!(enrollment.email, None);
    }
}
