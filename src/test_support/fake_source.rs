//! Scripted in-memory [`CollectionSource`] for fetch and pipeline tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::source::{
    CollectionSource, PageRequest, PageResponse, SearchRequest, SearchResponse, SourceError,
};

/// Builds `count` minimal pages with ids `{prefix}-0`, `{prefix}-1`, ...
pub(crate) fn items(prefix: &str, count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| json!({"object": "page", "id": format!("{prefix}-{i}")}))
        .collect()
}

/// Source that replays scripted pages and records every request it receives.
#[derive(Default)]
pub(crate) struct FakeSource {
    pages: Mutex<VecDeque<Option<PageResponse>>>,
    search: Option<Vec<Value>>,
    page_requests: Mutex<Vec<PageRequest>>,
    search_requests: Mutex<Vec<SearchRequest>>,
}

impl FakeSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_page(self, results: Vec<Value>, next_cursor: Option<&str>, has_more: bool) -> Self {
        self.push_page(Some(PageResponse {
            results,
            has_more,
            next_cursor: next_cursor.map(str::to_string),
        }))
    }

    pub(crate) fn with_failing_page(self) -> Self {
        self.push_page(None)
    }

    pub(crate) fn with_search(mut self, results: Vec<Value>) -> Self {
        self.search = Some(results);
        self
    }

    pub(crate) fn with_failing_search(mut self) -> Self {
        self.search = None;
        self
    }

    fn push_page(self, page: Option<PageResponse>) -> Self {
        if let Ok(mut pages) = self.pages.lock() {
            pages.push_back(page);
        }
        self
    }

    pub(crate) fn page_requests(&self) -> Vec<PageRequest> {
        self.page_requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    pub(crate) fn search_requests(&self) -> Vec<SearchRequest> {
        self.search_requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    pub(crate) fn search_calls(&self) -> usize {
        self.search_requests().len()
    }
}

#[async_trait]
impl CollectionSource for FakeSource {
    fn name(&self) -> &str {
        "fake"
    }

    async fn query_page(&self, request: &PageRequest) -> Result<PageResponse, SourceError> {
        if let Ok(mut requests) = self.page_requests.lock() {
            requests.push(request.clone());
        }
        let next = self.pages.lock().ok().and_then(|mut pages| pages.pop_front());
        match next {
            Some(Some(page)) => Ok(page),
            Some(None) => Err(SourceError::http_status("databases/fake/query", 502, "Bad Gateway")),
            None => Err(SourceError::decode("databases/fake/query", "no page scripted")),
        }
    }

    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SourceError> {
        if let Ok(mut requests) = self.search_requests.lock() {
            requests.push(request.clone());
        }
        self.search
            .clone()
            .map(|results| SearchResponse { results })
            .ok_or_else(|| SourceError::http_status("search", 503, "Service Unavailable"))
    }
}
