use crate::api::Client;
use crate::config::Config;
use crate::error::Result;
use crate::output::JsonArrayWriter;
use std::io::Write;
use tracing::info;

/// Write the stores matching the configured query as a JSON array.
pub async fn run_stores<W: Write>(client: &Client, config: &Config, output: W) -> Result<usize> {
    let stores = if config.store_query.is_empty() {
        client.stores().await?
    } else {
        client.search_stores(&config.store_query, true).await?
    };

    let mut out = JsonArrayWriter::new(output)?;
    for store in &stores {
        out.write_item(store)?;
    }
    out.finish()?;

    info!(stores = stores.len(), "fetched stores");
    Ok(stores.len())
}
