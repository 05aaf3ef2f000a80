//! # Sysbol Engine
//!
//! A paginated, filterable search engine for the Systembolaget product
//! search API.
//!
//! The vendor API serves results one page at a time. This crate turns that
//! into a single forward-only [`Cursor`] that looks like one flat sequence of
//! records: page boundaries, the "has more" decision and rate limiting are
//! handled internally, and the first fatal error stops the walk for good.
//!
//! ## Design Principles
//!
//! - **No HTTP**: requests go through the [`Transport`] trait; the engine only
//!   decides *when* to ask for a page
//! - **Deterministic**: the same predicates always encode to the same query
//! - **Pass-through records**: results are opaque attribute bags, never bound
//!   to a schema the vendor may change
//! - **Fail fast**: no retries, no skipped pages, a sticky error instead
//!
//! ## Core Concepts
//!
//! ### Predicates
//!
//! A [`Predicate`] is one filter dimension (price range, origin country,
//! category, ...). Predicates are collected in a [`PredicateSet`] and encoded
//! into [`QueryParams`]. Range and hierarchy predicates overwrite their
//! parameters; multi-valued predicates add to them.
//!
//! ### Options
//!
//! [`QueryOptions`] carries page size, starting page and sorting.
//!
//! ### Pages and records
//!
//! Each request yields a [`ResultPage`]: a [`PageMetadata`] block and a list
//! of [`Record`]s. Only [`PageMetadata::next_page`] decides whether another
//! page exists.
//!
//! ### Cursor
//!
//! [`Cursor::advance`] moves to the next record and fetches pages on demand,
//! waiting a configurable delay between page requests. A
//! [`CancellationToken`] aborts the wait or the in-flight request.
//!
//! ## Quick Start
//!
//! ```rust
//! use sysbol_engine::{
//!     encode_search, Predicate, PredicateSet, QueryOptions, SortDirection, SortProperty,
//! };
//!
//! let predicates = PredicateSet::new()
//!     .with(Predicate::price(100, 500))
//!     .with(Predicate::origin("Frankrike"))
//!     .with(Predicate::origin("Italien"));
//!
//! let options = QueryOptions::new().sorted_by(SortProperty::Price, SortDirection::Ascending);
//!
//! let query = encode_search(&options, &predicates);
//! assert_eq!(
//!     query.encode(),
//!     "size=30&page=1&sortBy=Price&sortDirection=Ascending\
//!      &price.min=100&price.max=500&country=Frankrike&country=Italien"
//! );
//! ```

pub mod cancel;
pub mod cursor;
pub mod error;
pub mod options;
pub mod page;
pub mod params;
pub mod predicate;
pub mod record;
pub mod transport;

// Re-export main types at crate root
pub use cancel::CancellationToken;
pub use cursor::{Cursor, CursorState};
pub use error::{Error, Result};
pub use options::{
    encode_query, encode_search, QueryOptions, SortDirection, SortProperty, UnknownVariant,
    DEFAULT_PAGE_SIZE, FIRST_PAGE,
};
pub use page::{Filter, PageMetadata, Range, ResultPage, SearchModifier};
pub use params::{Param, QueryParams};
pub use predicate::{Predicate, PredicateSet};
pub use record::Record;
pub use transport::Transport;

pub use async_trait::async_trait;
