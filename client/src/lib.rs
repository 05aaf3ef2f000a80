//! # sysbol-client
//!
//! HTTP transport for [`sysbol_engine`], plus the store and stock endpoints,
//! public API key discovery and the building blocks of the `sysbol` CLI.
//!
//! ```no_run
//! use sysbol_client::Client;
//! use sysbol_engine::{Predicate, PredicateSet, QueryOptions};
//!
//! # async fn run() -> sysbol_client::Result<()> {
//! let client = Client::new("subscription-key")?;
//! let mut cursor = client.search_with_cursor(
//!     PredicateSet::new().with(Predicate::origin("Frankrike")),
//!     QueryOptions::new(),
//! );
//!
//! while cursor.advance().await {
//!     if let Some(record) = cursor.current() {
//!         println!("{:?}", record.get_str("productNameBold"));
//!     }
//! }
//! if let Some(err) = cursor.last_error() {
//!     eprintln!("search stopped: {err}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod commands;
pub mod config;
pub mod credentials;
pub mod error;
pub mod output;

pub use api::{Client, ClientBuilder, StockBalance, Store, StoreOpeningHours, StorePosition};
pub use config::{Config, ConfigError};
pub use credentials::discover_api_key;
pub use error::{ClientError, Result};
