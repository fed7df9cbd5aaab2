//! Pagination controller: sequential boundary probe, then parallel page dispatch.
//!
//! The storefront does not say how many result pages a query has, so the
//! end of the listing is found by probing: pages are fetched in order from
//! 1 until one yields no matching records. Every page seen to hold records
//! is then dispatched as its own task on a pool bounded by
//! [`ScraperConfig::worker_count`]; each task fetches and extracts its page
//! itself. Only pages already known to be non-empty are dispatched.
//!
//! # State Machine
//!
//! ```text
//! ┌───────┐ term  ┌─────────┐ boundary ┌──────────┐ all tasks ┌─────────┐   ┌──────┐
//! │ Start ├──────►│ Probing ├─────────►│ Dispatch ├──────────►│ Collect ├──►│ Done │
//! └───┬───┘       └─────────┘          └────┬─────┘           └─────────┘   └──▲───┘
//!     │ empty term                          │ interrupted                      │
//!     └─────────────────────────────────────┴──────────────────────────────────┘
//! ```
//!
//! A local fixture skips probing: its single page goes straight to dispatch.

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

use crate::config::ScraperConfig;
use crate::error::{Result, ScrapeError};
use crate::extract::{extract_products, ProductSelectors};
use crate::fetch::PageSource;
use crate::types::{PageLocator, PageResult, ProductRecord, SearchResult, SourceKind};

use super::aggregate::aggregate;
use super::query::QueryUrl;

/// Why probing stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// This page had no matching records.
    EmptyPage(u32),
    /// This page could not be fetched; it is treated as the end.
    FetchFailed(u32),
    /// The configured page limit was reached.
    PageLimit(u32),
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPage(page) => write!(f, "page {page} was empty"),
            Self::FetchFailed(page) => write!(f, "page {page} could not be fetched"),
            Self::PageLimit(limit) => write!(f, "page limit {limit} reached"),
        }
    }
}

/// Result of probing a single page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The page held this many matching records.
    Records(usize),
    /// The page held no matching records.
    Empty,
    /// The page could not be fetched.
    Failed,
}

/// Where boundary probing stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeState {
    /// `next_page` is the next index to probe; `found` lists pages with records.
    Probing { next_page: u32, found: Vec<u32> },
    /// Probing is over; `found` pages will be dispatched.
    Finished { found: Vec<u32>, boundary: Boundary },
}

impl ProbeState {
    /// Initial state: nothing found, page 1 next.
    pub fn start() -> Self {
        Self::Probing {
            next_page: 1,
            found: Vec::new(),
        }
    }

    /// Page index to probe next, or `None` once finished.
    pub fn next_page(&self) -> Option<u32> {
        match self {
            Self::Probing { next_page, .. } => Some(*next_page),
            Self::Finished { .. } => None,
        }
    }

    /// Advance with the outcome of probing [`Self::next_page`].
    ///
    /// Pages stay strictly increasing with no gaps, and nothing is probed
    /// past the first empty or failed page or past `max_pages`.
    #[must_use]
    pub fn advance(self, outcome: ProbeOutcome, max_pages: u32) -> Self {
        let (next_page, mut found) = match self {
            Self::Probing { next_page, found } => (next_page, found),
            finished @ Self::Finished { .. } => return finished,
        };

        match outcome {
            ProbeOutcome::Empty => Self::Finished {
                found,
                boundary: Boundary::EmptyPage(next_page),
            },
            ProbeOutcome::Failed => Self::Finished {
                found,
                boundary: Boundary::FetchFailed(next_page),
            },
            ProbeOutcome::Records(_) => {
                found.push(next_page);
                if next_page >= max_pages {
                    Self::Finished {
                        found,
                        boundary: Boundary::PageLimit(max_pages),
                    }
                } else {
                    Self::Probing {
                        next_page: next_page + 1,
                        found,
                    }
                }
            }
        }
    }
}

/// Drives one search across every result page of a [`PageSource`].
pub struct Paginator<S> {
    source: Arc<S>,
    selectors: Arc<ProductSelectors>,
    base_source: String,
    workers: usize,
    max_pages: u32,
    cancel: CancellationToken,
}

impl<S: PageSource + 'static> Paginator<S> {
    /// Create a paginator reading pages from `source`.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Config`] if `config` is invalid or a selector
    /// does not compile.
    pub fn new(source: S, config: &ScraperConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            source: Arc::new(source),
            selectors: Arc::new(ProductSelectors::compile(&config.selectors)?),
            base_source: config.base_source.clone(),
            workers: config.worker_count(),
            max_pages: config.max_pages,
            cancel: CancellationToken::new(),
        })
    }

    /// Use `token` to interrupt page dispatch from outside.
    ///
    /// Cancellation is permanent: once `token` fires, this paginator and
    /// every later search for a non-empty term return
    /// [`ScrapeError::Interrupted`]. Build a new paginator with a fresh
    /// token to search again.
    #[must_use]
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Token that interrupts the dispatch of this paginator's searches.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Find every record matching `term` across all result pages.
    ///
    /// An empty (or whitespace-only) term returns an empty set without
    /// touching the source. Pages that fail to fetch contribute nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Interrupted`] if the cancel token fires or a
    /// page task dies before every dispatched page has finished. No partial
    /// result is returned in that case.
    pub async fn search(&self, term: &str) -> Result<SearchResult> {
        let term = term.trim();
        if term.is_empty() {
            tracing::debug!("empty search term, nothing to fetch");
            return Ok(SearchResult::new());
        }

        let pages = match SourceKind::detect(&self.base_source) {
            SourceKind::Remote => self.probe(term).await,
            SourceKind::Local => vec![PageLocator::Local {
                path: PathBuf::from(&self.base_source),
            }],
        };

        let per_page = self.dispatch(term, pages).await?;
        Ok(aggregate(per_page))
    }

    /// Fetch pages in order until the listing runs dry; return the pages
    /// that held records.
    async fn probe(&self, term: &str) -> Vec<PageLocator> {
        let query = QueryUrl::new(&self.base_source, term);
        tracing::trace!(query = query.as_str(), "probing result pages");

        let mut state = ProbeState::start();
        while let Some(page) = state.next_page() {
            if self.cancel.is_cancelled() {
                tracing::debug!(page, "search cancelled while probing");
                return Vec::new();
            }
            let locator = query.page(page);
            let outcome = match scrape_page(self.source.as_ref(), &self.selectors, &locator, term).await {
                Ok(result) if result.is_boundary() => ProbeOutcome::Empty,
                Ok(result) => ProbeOutcome::Records(result.records.len()),
                Err(err) => {
                    tracing::warn!(page, error = %err, "probe fetch failed, treating as last page");
                    ProbeOutcome::Failed
                }
            };
            state = state.advance(outcome, self.max_pages);
        }

        match state {
            ProbeState::Finished { found, boundary } => {
                if matches!(boundary, Boundary::PageLimit(_)) {
                    tracing::warn!(%boundary, "stopped probing before the listing ran dry");
                }
                tracing::debug!(pages = found.len(), %boundary, "probing finished");
                found.into_iter().map(|page| query.page(page)).collect()
            }
            ProbeState::Probing { .. } => Vec::new(),
        }
    }

    /// Fetch and extract every page in parallel, at most `workers` at a time.
    async fn dispatch(
        &self,
        term: &str,
        pages: Vec<PageLocator>,
    ) -> Result<Vec<HashSet<ProductRecord>>> {
        if self.cancel.is_cancelled() {
            return Err(ScrapeError::Interrupted("cancelled before dispatch".into()));
        }
        if pages.is_empty() {
            return Ok(Vec::new());
        }
        tracing::debug!(pages = pages.len(), workers = self.workers, "dispatching page tasks");

        let semaphore = Arc::new(Semaphore::new(self.workers));
        let handles: Vec<_> = pages
            .into_iter()
            .map(|locator| {
                let source = Arc::clone(&self.source);
                let selectors = Arc::clone(&self.selectors);
                let semaphore = Arc::clone(&semaphore);
                let term = term.to_owned();

                tokio::spawn(async move {
                    let Ok(_permit) = semaphore.acquire_owned().await else {
                        return HashSet::new();
                    };
                    match scrape_page(source.as_ref(), &selectors, &locator, &term).await {
                        Ok(result) => {
                            tracing::debug!(page = result.page, count = result.records.len(), "page scraped");
                            result.records
                        }
                        Err(err) => {
                            tracing::warn!(page = locator.page(), error = %err, "page fetch failed, skipping");
                            HashSet::new()
                        }
                    }
                })
            })
            .collect();

        let aborts: Vec<_> = handles.iter().map(tokio::task::JoinHandle::abort_handle).collect();

        let joined = tokio::select! {
            biased;
            () = self.cancel.cancelled() => {
                for abort in &aborts {
                    abort.abort();
                }
                return Err(ScrapeError::Interrupted(
                    "cancelled while pages were being fetched".into(),
                ));
            }
            joined = futures::future::join_all(handles) => joined,
        };

        joined
            .into_iter()
            .map(|outcome| {
                outcome.map_err(|e| ScrapeError::Interrupted(format!("page task did not finish: {e}")))
            })
            .collect()
    }
}

/// Fetch one page and extract its matching records.
async fn scrape_page<S: PageSource>(
    source: &S,
    selectors: &ProductSelectors,
    locator: &PageLocator,
    term: &str,
) -> Result<PageResult> {
    let html = source.fetch(locator).await?;
    let records = extract_products(&html, term, selectors);
    Ok(PageResult {
        page: locator.page(),
        records,
    })
}
