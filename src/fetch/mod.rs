//! Whole-collection retrieval with a best-effort fallback.
//!
//! [`PaginatedFetcher::fetch_all`] tries two strategies in fixed order:
//!
//! 1. **Paginated** - follow continuation cursors until the source reports
//!    no more pages. Any failure throws away the pages gathered so far.
//! 2. **Search** - one broad search for recently edited pages, capped at a
//!    single page. This is not a continuation of step 1 and may miss pages.
//!
//! If both fail the result is empty. Nothing here returns an error: a zero
//! length result is the caller's only signal that retrieval degraded.

use std::fmt;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::source::{CollectionSource, PageRequest, SearchRequest, SourceError};

/// Page size requested from the paginated endpoint.
pub const PAGE_SIZE: u32 = 100;

/// Result cap requested from the search fallback.
pub const SEARCH_PAGE_SIZE: u32 = 100;

/// Which strategy produced a [`RawCollectionResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrievalStrategy {
    /// Complete cursor pagination over the collection.
    Paginated,
    /// Single best-effort search after pagination failed.
    Search,
    /// Both strategies failed; the result is empty.
    Unavailable,
}

impl fmt::Display for RetrievalStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paginated => write!(f, "paginated"),
            Self::Search => write!(f, "search"),
            Self::Unavailable => write!(f, "unavailable"),
        }
    }
}

/// Raw pages in source order plus the strategy that produced them.
#[derive(Debug, Clone)]
pub struct RawCollectionResult {
    /// Raw page objects in the order the source returned them.
    pub records: Vec<Value>,
    /// Strategy that produced `records`.
    pub strategy: RetrievalStrategy,
}

impl RawCollectionResult {
    /// Returns true if the primary, paginated strategy produced the records.
    #[must_use]
    pub fn is_primary(&self) -> bool {
        self.strategy == RetrievalStrategy::Paginated
    }

    /// Returns the number of raw records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no records were retrieved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Retrieves every page of a collection, degrading to search on failure.
///
/// The fetcher is stateless. Cursor and accumulator live only for the
/// duration of one [`fetch_all`](Self::fetch_all) call.
#[derive(Debug, Clone, Copy)]
pub struct PaginatedFetcher {
    page_size: u32,
    search_page_size: u32,
}

impl Default for PaginatedFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PaginatedFetcher {
    /// Creates a fetcher with the standard page sizes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            page_size: PAGE_SIZE,
            search_page_size: SEARCH_PAGE_SIZE,
        }
    }

    /// Fetches the whole collection. Never fails; see the module docs.
    #[tracing::instrument(skip(self, source), fields(source = source.name()))]
    pub async fn fetch_all(&self, source: &dyn CollectionSource) -> RawCollectionResult {
        match self.paginate(source).await {
            Ok(records) => {
                info!(records = records.len(), "Paginated retrieval complete");
                return RawCollectionResult {
                    records,
                    strategy: RetrievalStrategy::Paginated,
                };
            }
            Err(error) => {
                warn!(
                    error = %error,
                    "Paginated retrieval failed; falling back to search, which may return an incomplete collection"
                );
            }
        }

        match source
            .search(&SearchRequest::recent_pages(self.search_page_size))
            .await
        {
            Ok(found) => {
                info!(records = found.results.len(), "Search fallback complete");
                RawCollectionResult {
                    records: found.results,
                    strategy: RetrievalStrategy::Search,
                }
            }
            Err(error) => {
                warn!(error = %error, "Search fallback failed; returning empty collection");
                RawCollectionResult {
                    records: Vec::new(),
                    strategy: RetrievalStrategy::Unavailable,
                }
            }
        }
    }

    /// Follows cursors until exhaustion.
    ///
    /// Stops when `has_more` is false or when no usable cursor comes back, so
    /// a source claiming more pages without a cursor cannot loop forever.
    async fn paginate(&self, source: &dyn CollectionSource) -> Result<Vec<Value>, SourceError> {
        let mut records = Vec::new();
        let mut cursor: Option<String> = None;
        let mut page_number: usize = 0;

        loop {
            let request = PageRequest {
                page_size: self.page_size,
                start_cursor: cursor.take(),
            };
            let page = source.query_page(&request).await?;
            page_number += 1;

            debug!(
                page = page_number,
                items = page.results.len(),
                has_more = page.has_more,
                "Received page"
            );
            records.extend(page.results);

            match page.next_cursor.filter(|next| !next.is_empty()) {
                Some(next) if page.has_more => cursor = Some(next),
                _ => {
                    if page.has_more {
                        debug!(page = page_number, "Source reported more pages without a cursor; stopping");
                    }
                    break;
                }
            }
        }

        Ok(records)
    }
}
