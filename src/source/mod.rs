//! Collection sources: where raw pages come from.
//!
//! The fetch pipeline only knows the two request/response shapes defined here.
//! Transport, authentication headers, and endpoint layout are the concern of
//! each [`CollectionSource`] implementation.
//!
//! # Architecture
//!
//! - [`CollectionSource`] - Async trait with a paginated query and a broad search
//! - [`NotionSource`] - HTTP implementation against the Notion REST API
//! - [`SourceError`] - Transport, status, and decode failures

mod error;
mod http_client;
mod notion;

pub use error::SourceError;
pub use http_client::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_READ_TIMEOUT_SECS, HttpTimeouts,
    build_source_http_client,
};
pub use notion::{DEFAULT_BASE_URL, NOTION_VERSION, NotionSource};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of one paginated query request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page_size: u32,
    /// Continuation cursor from the previous page; absent on the first call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
}

impl PageRequest {
    /// Creates a request for the first page.
    #[must_use]
    pub fn first(page_size: u32) -> Self {
        Self {
            page_size,
            start_cursor: None,
        }
    }

    /// Creates a request continuing from `cursor`.
    #[must_use]
    pub fn after(page_size: u32, cursor: impl Into<String>) -> Self {
        Self {
            page_size,
            start_cursor: Some(cursor.into()),
        }
    }
}

/// One page of query results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageResponse {
    #[serde(default)]
    pub results: Vec<Value>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Filter clause of a search request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilter {
    pub property: String,
    pub value: String,
}

/// Sort clause of a search request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSort {
    pub direction: String,
    pub timestamp: String,
}

/// Body of a broad search request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub filter: SearchFilter,
    pub sort: SearchSort,
    pub page_size: u32,
}

impl SearchRequest {
    /// Searches pages, most recently edited first.
    #[must_use]
    pub fn recent_pages(page_size: u32) -> Self {
        Self {
            filter: SearchFilter {
                property: "object".to_string(),
                value: "page".to_string(),
            },
            sort: SearchSort {
                direction: "descending".to_string(),
                timestamp: "last_edited_time".to_string(),
            },
            page_size,
        }
    }
}

/// Results of a broad search. Completeness is not guaranteed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<Value>,
}

/// A collection of raw pages that can be queried page by page or searched.
///
/// # Object Safety
///
/// This trait uses `async_trait` so fetchers can take `&dyn CollectionSource`.
#[async_trait]
pub trait CollectionSource: Send + Sync {
    /// Returns the source's name for logging.
    fn name(&self) -> &str;

    /// Fetches one page of the collection.
    async fn query_page(&self, request: &PageRequest) -> Result<PageResponse, SourceError>;

    /// Runs a broad best-effort search for pages.
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SourceError>;
}
