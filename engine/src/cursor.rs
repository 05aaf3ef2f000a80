//! Cursor - a flat, forward-only view over paged search results.
//!
//! The cursor fetches pages lazily through a [`Transport`], waits a
//! configurable delay between page requests and stops for good at the first
//! failed request. Callers drive it with [`Cursor::advance`] and read the
//! record under it with [`Cursor::current`]:
//!
//! ```no_run
//! # async fn run(transport: impl sysbol_engine::Transport) {
//! use sysbol_engine::{Cursor, Predicate, PredicateSet, QueryOptions};
//!
//! let predicates = PredicateSet::new().with(Predicate::origin("Frankrike"));
//! let mut cursor = Cursor::new(transport, predicates, QueryOptions::new());
//!
//! while cursor.advance().await {
//!     let record = cursor.current().unwrap();
//!     println!("{:?}", record.get("productNameBold"));
//! }
//! if let Some(err) = cursor.last_error() {
//!     eprintln!("search failed: {err}");
//! }
//! # }
//! ```

use crate::{
    CancellationToken, Error, PredicateSet, QueryOptions, QueryParams, Record, ResultPage,
    Transport, FIRST_PAGE,
};
use futures::Stream;
use std::time::Duration;
use tracing::{debug, warn, Instrument, Span};

/// Where a cursor is in its walk over the result pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// No page fetched yet.
    NotStarted,
    /// The loaded page has records after the current one.
    InPage,
    /// The loaded page has been read to the end; the next advance fetches.
    PageExhausted,
    /// The server announced no further pages.
    Done,
    /// A fetch failed or the search was cancelled. Terminal.
    Errored,
}

/// Forward-only cursor over every record of a search.
pub struct Cursor<T> {
    transport: T,
    predicates: PredicateSet,
    /// Predicates encoded once; identical for every page request.
    encoded: QueryParams,
    /// `page` holds the last requested page number and is owned by the cursor.
    options: QueryOptions,
    current_page: Option<ResultPage>,
    index: Option<usize>,
    error: Option<Error>,
    done: bool,
    page_delay: Duration,
    cancel: CancellationToken,
    span: Span,
}

impl<T: Transport> Cursor<T> {
    /// Create a cursor. No request is made until the first [`advance`](Self::advance).
    ///
    /// Unset page size defaults to 30. A non-zero `options.page` is the first
    /// page requested.
    pub fn new(transport: T, predicates: PredicateSet, options: QueryOptions) -> Self {
        let start = if options.page == 0 {
            FIRST_PAGE
        } else {
            options.page
        };
        let mut options = options.with_defaults();
        options.page = start - 1;

        let span = tracing::info_span!(
            "search",
            search_id = %uuid::Uuid::new_v4(),
            predicates = predicates.len()
        );

        Self {
            transport,
            encoded: predicates.encode(),
            predicates,
            options,
            current_page: None,
            index: None,
            error: None,
            done: false,
            page_delay: Duration::ZERO,
            cancel: CancellationToken::new(),
            span,
        }
    }

    /// Wait this long before every page request except the first.
    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    /// Abort waits and in-flight requests when `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Log page fetches inside `span` instead of a fresh `search` span.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Move to the next record, fetching a page if needed.
    ///
    /// Returns `false` when there are no more records or when the search
    /// failed; check [`last_error`](Self::last_error) to tell them apart.
    /// Once an error is recorded every further call returns `false`.
    pub async fn advance(&mut self) -> bool {
        if self.error.is_some() || self.done {
            return false;
        }

        if self.cancel.is_cancelled() {
            return self.fail(Error::Cancelled);
        }

        if let (Some(page), Some(index)) = (&self.current_page, self.index) {
            if index + 1 < page.len() {
                self.index = Some(index + 1);
                return true;
            }
        }

        // Always try once; afterwards only the next-page indicator counts.
        if let Some(page) = &self.current_page {
            if !page.has_next_page() {
                let _enter = self.span.enter();
                debug!(page = self.options.page, "no more pages");
                self.done = true;
                self.index = None;
                return false;
            }
        }

        let span = self.span.clone();
        self.fetch_next_page().instrument(span).await
    }

    async fn fetch_next_page(&mut self) -> bool {
        if self.current_page.is_some() && !self.page_delay.is_zero() {
            debug!(delay_ms = self.page_delay.as_millis() as u64, "waiting before next page");
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return self.fail(Error::Cancelled),
                _ = tokio::time::sleep(self.page_delay) => {}
            }
        }

        let Some(next) = self.options.page.checked_add(1) else {
            debug!(page = self.options.page, "page number exhausted");
            self.done = true;
            self.index = None;
            return false;
        };
        self.options.page = next;
        debug!(page = self.options.page, "fetching page");

        let result = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(Error::Cancelled),
            result = self.transport.search(&self.options, &self.encoded) => result,
        };

        match result {
            Ok(page) => {
                debug!(
                    page = self.options.page,
                    records = page.len(),
                    next_page = page.metadata.next_page,
                    "fetched page"
                );
                let has_records = !page.is_empty();
                self.current_page = Some(page);
                self.index = Some(0);
                has_records
            }
            Err(err) => self.fail(err),
        }
    }

    fn fail(&mut self, err: Error) -> bool {
        let _enter = self.span.enter();
        if err.is_cancelled() {
            debug!(page = self.options.page, "search cancelled");
        } else {
            warn!(page = self.options.page, error = %err, "search failed");
        }
        self.error = Some(err);
        self.index = None;
        false
    }

    /// The record under the cursor, if any.
    pub fn current(&self) -> Option<&Record> {
        let page = self.current_page.as_ref()?;
        page.get(self.index?)
    }

    /// The error that stopped the cursor, if any.
    pub fn last_error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Consume the cursor, keeping only the error that stopped it.
    pub fn into_error(self) -> Option<Error> {
        self.error
    }

    /// The most recently fetched page, e.g. to read the full result count.
    pub fn current_page(&self) -> Option<&ResultPage> {
        self.current_page.as_ref()
    }

    /// Number of the last requested page.
    ///
    /// Before the first request this is one less than the starting page.
    pub fn page(&self) -> u32 {
        self.options.page
    }

    /// Options sent with every request; `page` is the last requested page.
    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    /// The filters this cursor searches with.
    pub fn predicates(&self) -> &PredicateSet {
        &self.predicates
    }

    /// Where the cursor is in its walk.
    pub fn state(&self) -> CursorState {
        if self.error.is_some() {
            return CursorState::Errored;
        }
        if self.done {
            return CursorState::Done;
        }
        match (&self.current_page, self.index) {
            (None, _) => CursorState::NotStarted,
            (Some(page), Some(index)) if index + 1 < page.len() => CursorState::InPage,
            _ => CursorState::PageExhausted,
        }
    }

    /// Turn the cursor into a stream of records.
    ///
    /// The stream ends after the last record, or after yielding the error
    /// that stopped the cursor.
    pub fn into_stream(self) -> impl Stream<Item = Result<Record, Error>> {
        futures::stream::unfold(Some(self), |state| async move {
            let mut cursor = state?;
            if cursor.advance().await {
                let record = cursor.current().cloned()?;
                Some((Ok(record), Some(cursor)))
            } else {
                cursor.error.take().map(|err| (Err(err), None))
            }
        })
    }
}
