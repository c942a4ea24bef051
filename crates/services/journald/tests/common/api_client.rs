use std::net::SocketAddr;

use journal_auth::account::Enrollment;
use reqwest::{StatusCode, header};
use serde_json::Value;

/// A response reduced to what the tests look at.
pub struct Reply {
    pub status: StatusCode,
    pub challenge: Option<String>,
    pub body: Value,
}

impl Reply {
    async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let challenge = response
            .headers()
            .get(header::WWW_AUTHENTICATE)
            .and_then(|h| h.to_str().ok())
            .map(String::from);
        let text = response.text().await.expect("Failed to get response text");
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self {
            status,
            challenge,
            body,
        }
    }

    pub fn error_message(&self) -> &str {
        self.body["error"]["message"].as_str().unwrap_or_default()
    }

    pub fn access_token(&self) -> String {
        assert_eq!(self.status, StatusCode::OK, "login failed: {}", self.body);
        assert_eq!(self.body["token_type"], "bearer");
        self.body["access_token"]
            .as_str()
            .expect("Missing access token")
            .to_string()
    }
}

pub struct ApiClient {
    pub url: String,
}

impl ApiClient {
    pub fn new(addr: SocketAddr) -> Self {
        Self {
            url: format!("http://{addr}/v1"),
        }
    }

    fn path(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.url)
    }

    async fn send(request: reqwest::RequestBuilder) -> Reply {
        let response = request.send().await.expect("Failed to send http request");
        Reply::from_response(response).await
    }

    pub async fn enroll(&self, client: &reqwest::Client, enrollment: &Enrollment) -> Reply {
        let payload = serde_json::to_string(enrollment).expect("Couldn't serialize enrollment");
        Self::send(
            client
                .post(self.path("journal"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(payload),
        )
        .await
    }

    pub async fn login(&self, client: &reqwest::Client, username: &str, password: &str) -> Reply {
        Self::send(client.post(self.path("login")).form(&[
            ("grant_type", "password"),
            ("username", username),
            ("password", password),
        ]))
        .await
    }

    pub async fn login_basic(
        &self,
        client: &reqwest::Client,
        username: &str,
        password: &str,
    ) -> Reply {
        Self::send(
            client
                .get(self.path("login"))
                .basic_auth(username, Some(password)),
        )
        .await
    }

    /// Reads a journal, at `/journal/{username}` when a username is given.
    pub async fn journal(
        &self,
        client: &reqwest::Client,
        username: Option<&str>,
        token: Option<&str>,
    ) -> Reply {
        let endpoint = match username {
            Some(username) => format!("journal/{username}"),
            None => String::from("journal"),
        };
        let mut request = client.get(self.path(&endpoint));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        Self::send(request).await
    }
}
