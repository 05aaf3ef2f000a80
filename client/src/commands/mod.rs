//! CLI commands.

mod assortment;
mod stock;
mod stores;

pub use assortment::run_assortment;
pub use stock::run_stock;
pub use stores::run_stores;

use crate::api::Client;
use crate::config::Config;
use crate::credentials::discover_api_key;
use crate::error::{ClientError, Result};
use crate::output::open_output;
use std::str::FromStr;
use sysbol_engine::CancellationToken;

/// A CLI subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Stream the product assortment matching the configured filters.
    Assortment,
    /// List stores matching the configured query.
    Stores,
    /// Stock of one product in one store.
    Stock,
}

impl FromStr for Command {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "assortment" => Ok(Command::Assortment),
            "stores" => Ok(Command::Stores),
            "stock" => Ok(Command::Stock),
            other => Err(ClientError::BadRequest(format!(
                "unknown command '{other}', expected one of: assortment, stores, stock"
            ))),
        }
    }
}

/// Build an API client from configuration, discovering the key if needed.
pub async fn connect(config: &Config) -> Result<Client> {
    let api_key = match &config.api_key {
        Some(key) => key.clone(),
        None => {
            tracing::info!("no API key configured, fetching the public one");
            discover_api_key(&discovery_client(config)?, &config.site_url).await?
        }
    };

    let mut builder = Client::builder(api_key).base_url(&config.api_base_url);
    if let Some(user_agent) = &config.user_agent {
        builder = builder.user_agent(user_agent);
    }
    if let Some(proxy) = &config.proxy {
        builder = builder.proxy(proxy);
    }
    builder.build()
}

fn discovery_client(config: &Config) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(user_agent) = &config.user_agent {
        builder = builder.user_agent(user_agent);
    }
    if let Some(proxy) = &config.proxy {
        builder = builder.proxy(reqwest::Proxy::all(proxy)?);
    }
    Ok(builder.build()?)
}

/// Run `command`, writing JSON to the configured output.
pub async fn run(command: Command, config: &Config, cancel: CancellationToken) -> Result<()> {
    let client = connect(config).await?;
    let output = open_output(config.output.as_deref())?;

    match command {
        Command::Assortment => {
            run_assortment(&client, config, cancel, output).await?;
        }
        Command::Stores => {
            run_stores(&client, config, output).await?;
        }
        Command::Stock => run_stock(&client, config, output).await?,
    }
    Ok(())
}
