//! sysbol - search the Systembolaget catalog from the command line.
//!
//! Usage: `sysbol <assortment|stores|stock>`. Everything else is read from
//! `SYSBOL_*` environment variables or a `.env` file.

use sysbol_client::commands::{self, Command};
use sysbol_client::Config;
use sysbol_engine::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    // Initialize tracing. Stdout carries the JSON output.
    let default_filter = if config.verbose {
        "sysbol_client=debug,sysbol_engine=debug"
    } else {
        "sysbol_client=info,sysbol_engine=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let command: Command = std::env::args()
        .nth(1)
        .ok_or("usage: sysbol <assortment|stores|stock>")?
        .parse()?;

    let cancel = CancellationToken::new();
    tokio::spawn(handle_interrupts(cancel.clone()));

    commands::run(command, &config, cancel).await?;

    Ok(())
}

/// First Ctrl-C cancels the running search; the second exits immediately.
async fn handle_interrupts(cancel: CancellationToken) {
    if tokio::signal::ctrl_c().await.is_err() {
        return;
    }
    tracing::info!("Caught signal, exiting gracefully");
    cancel.cancel();

    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("Caught signal, exiting now");
        std::process::exit(1);
    }
}
