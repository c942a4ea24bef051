use chrono::TimeDelta;
use journal_auth::{
    Algorithm, account::Enrollment, controller::AccessController, derived::DerivedTokens,
    scheme::TokenScheme, signed::SignedTokens, store::CredentialStore,
};
use journald::api::setup_api;
use tokio::task::JoinHandle;

use super::{TEST_SECRET, api_client::ApiClient};

/// A journald instance on an ephemeral port, stopped on drop.
pub struct TestContext {
    pub api: ApiClient,
    /// Keeps the `auth-token` cookie between requests.
    pub client: reqwest::Client,
    /// Sends only what each request sets explicitly.
    pub plain: reqwest::Client,
    pub controller: AccessController,
    handle: JoinHandle<journald::prelude::Result<()>>,
}

impl TestContext {
    pub async fn start(scheme: impl Into<TokenScheme>) -> Self {
        let controller = AccessController::new(CredentialStore::new(), scheme);
        let (addr, handle) = setup_api(
            "127.0.0.1:0".parse().unwrap(),
            controller.clone(),
            std::future::pending(),
        )
        .await
        .expect("Failed to start journald");

        let client = reqwest::ClientBuilder::new()
            .cookie_store(true)
            .build()
            .expect("Failed to build reqwest Client");

        Self {
            api: ApiClient::new(addr),
            client,
            plain: reqwest::Client::new(),
            controller,
            handle,
        }
    }

    pub async fn signed() -> Self {
        Self::signed_with_ttl(TimeDelta::seconds(300)).await
    }

    pub async fn signed_with_ttl(ttl: TimeDelta) -> Self {
        let tokens = SignedTokens::new(TEST_SECRET, Algorithm::HS256, ttl)
            .expect("Failed to create signing keys");
        Self::start(tokens).await
    }

    pub async fn derived() -> Self {
        Self::start(DerivedTokens::new()).await
    }

    /// Enrolls through the API and asserts it succeeded.
    pub async fn enroll(&self, username: &str, password: &str, secrets: &str) {
        let reply = self
            .api
            .enroll(&self.plain, &Enrollment::new(username, password, secrets))
            .await;
        assert_eq!(reply.status, reqwest::StatusCode::OK, "{}", reply.body);
        assert_eq!(reply.body["username"], username);
    }

    pub async fn token_for(&self, username: &str, password: &str) -> String {
        self.api
            .login(&self.plain, username, password)
            .await
            .access_token()
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
