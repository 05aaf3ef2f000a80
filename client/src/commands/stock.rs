use crate::api::Client;
use crate::config::Config;
use crate::error::{ClientError, Result};
use std::io::Write;

/// Write the stock balance of the configured product and store as JSON.
pub async fn run_stock<W: Write>(client: &Client, config: &Config, mut output: W) -> Result<()> {
    let (Some(store_id), Some(product_number)) = (&config.store_id, &config.product_number) else {
        return Err(ClientError::BadRequest(
            "SYSBOL_STORE_ID and SYSBOL_PRODUCT_NUMBER are required".into(),
        ));
    };

    let balance = client.stock_balance(store_id, product_number).await?;
    serde_json::to_writer_pretty(&mut output, &balance)?;
    output.write_all(b"\n")?;
    output.flush()?;
    Ok(())
}
