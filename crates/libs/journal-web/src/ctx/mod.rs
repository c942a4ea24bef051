//! Request context for authorized handlers.
//!
//! [`resolver::mw_ctx_resolver`] records which bearer token a request
//! presents; extracting [`Ctx`] validates it through the
//! [`AccessController`](journal_auth::controller::AccessController).

use journal_auth::account::{Account, AccountView};

pub mod resolver;

/// Where a presented token was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Header,
    Cookie,
}

/// A bearer token as presented by the client, not yet validated.
#[derive(Clone)]
pub struct PresentedToken {
    pub token: String,
    pub source: TokenSource,
}

impl std::fmt::Debug for PresentedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresentedToken")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// The account an authorized request acts as.
#[derive(Clone, Debug)]
pub struct Ctx {
    pub account: Account,
}

impl Ctx {
    pub fn new(account: Account) -> Self {
        Self { account }
    }

    pub fn username(&self) -> &str {
        &self.account.username
    }

    /// The account as a protected route may show it.
    pub fn view(&self) -> AccountView {
        AccountView::from(self.account.clone())
    }
}
