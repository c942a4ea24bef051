//! Journal service (journald)
//!
//! Serves the journal API until ctrl-c is received or the server fails.
//!
//! ```bash
//! export JWT_SECRET=your_jwt_secret
//! journald
//! ```
//!
//! Set `JOURNALD_TOKEN_SCHEME=derived` to issue derived tokens instead of
//! signed ones, and `JOURNALD_CONFIG` to load settings and seed accounts from
//! a TOML file.

use journald::{api::setup_api, config::JournalConfig, prelude::*};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{}=debug,journal_auth=debug,journal_web=debug,tower_http=debug",
                    env!("CARGO_CRATE_NAME")
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = JournalConfig::from_env()?;
    info!("Starting journald: {config}");
    let controller = config.controller()?;

    let (addr, api_handle) = setup_api(config.bind, controller, async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for ctrl-c: {err}");
        }
        info!("Shutting down");
    })
    .await?;
    info!("Journal API listening on {addr}");

    match api_handle.await {
        Ok(result) => result,
        Err(err) => {
            error!("API server task stopped: {err:?}");
            Ok(())
        }
    }
}
