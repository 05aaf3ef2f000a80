use crate::config::Config;
use crate::error::Result;
use crate::output::JsonArrayWriter;
use std::io::Write;
use sysbol_engine::{CancellationToken, Cursor, Transport};
use tracing::{debug, error, info};

/// Stream every record matching the configured filters to `output`.
///
/// Stops early at the configured limit. Returns the number of records
/// written. A cancelled search still closes the array and is not an error.
pub async fn run_assortment<T, W>(
    transport: T,
    config: &Config,
    cancel: CancellationToken,
    output: W,
) -> Result<usize>
where
    T: Transport,
    W: Write,
{
    let mut cursor = Cursor::new(transport, config.filters.clone(), config.query_options())
        .with_page_delay(config.page_delay)
        .with_cancellation(cancel);

    let mut out = JsonArrayWriter::new(output)?;

    debug!(filters = config.filters.len(), "fetching results");
    while cursor.advance().await {
        if let Some(record) = cursor.current() {
            out.write_item(record)?;
        }
        if config.limit > 0 && out.count() >= config.limit {
            break;
        }
    }

    let results = out.count();
    out.finish()?;

    let total_results = cursor
        .current_page()
        .map(|page| page.metadata.full_assortment_document_count);

    match cursor.into_error() {
        Some(e) if e.is_cancelled() => {
            info!(results, ?total_results, "search cancelled");
            Ok(results)
        }
        Some(e) => {
            error!(results, limit = config.limit, ?total_results, error = %e, "failed to fetch next item");
            Err(e.into())
        }
        None => {
            info!(results, limit = config.limit, ?total_results, "all results have been processed");
            Ok(results)
        }
    }
}
