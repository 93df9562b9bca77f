//! Notion REST API collection source.
//!
//! The [`NotionSource`] queries one database page by page through
//! `POST /databases/{id}/query` and falls back to workspace-wide
//! `POST /search` when asked to.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::SourceConfig;

use super::http_client::{HttpTimeouts, build_source_http_client};
use super::{CollectionSource, PageRequest, PageResponse, SearchRequest, SearchResponse, SourceError};

/// Default Notion API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";

/// API version sent in the `Notion-Version` header.
pub const NOTION_VERSION: &str = "2022-06-28";

/// Collection source backed by a Notion database.
pub struct NotionSource {
    client: Client,
    base_url: String,
    api_key: String,
    database_id: String,
}

impl NotionSource {
    /// Creates a source for `database_id` against the public Notion API.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if HTTP client construction fails.
    pub fn new(
        api_key: impl Into<String>,
        database_id: impl Into<String>,
    ) -> Result<Self, SourceError> {
        Self::build(
            api_key.into(),
            database_id.into(),
            DEFAULT_BASE_URL.to_string(),
            HttpTimeouts::default(),
        )
    }

    /// Creates a source with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if HTTP client construction fails.
    pub fn with_base_url(
        api_key: impl Into<String>,
        database_id: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, SourceError> {
        Self::build(
            api_key.into(),
            database_id.into(),
            base_url.into(),
            HttpTimeouts::default(),
        )
    }

    /// Creates a source from resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if HTTP client construction fails.
    #[tracing::instrument(skip_all, fields(base_url = %config.base_url))]
    pub fn from_config(config: &SourceConfig, timeouts: HttpTimeouts) -> Result<Self, SourceError> {
        Self::build(
            config.api_key.clone(),
            config.database_id.clone(),
            config.base_url.clone(),
            timeouts,
        )
    }

    fn build(
        api_key: String,
        database_id: String,
        base_url: String,
        timeouts: HttpTimeouts,
    ) -> Result<Self, SourceError> {
        let client = build_source_http_client(timeouts)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            database_id,
        })
    }

    /// Returns the database id this source queries.
    #[must_use]
    pub fn database_id(&self) -> &str {
        &self.database_id
    }

    async fn post<B, R>(&self, endpoint: &str, body: &B) -> Result<R, SourceError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = format!("{}/{endpoint}", self.base_url);
        debug!(api_url = %url, "Calling Notion API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("Notion-Version", NOTION_VERSION)
            .json(body)
            .send()
            .await
            .map_err(|e| SourceError::network(endpoint, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| SourceError::network(endpoint, e))?;

        if !status.is_success() {
            let message = api_error_message(&text).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string()
            });
            warn!(status = status.as_u16(), %message, endpoint, "Notion API error");
            return Err(SourceError::http_status(endpoint, status.as_u16(), message));
        }

        serde_json::from_str(&text).map_err(|e| SourceError::decode(endpoint, e.to_string()))
    }
}

/// Pulls the `message` field out of a Notion error body.
fn api_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

impl std::fmt::Debug for NotionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotionSource")
            .field("base_url", &self.base_url)
            .field("database_id", &self.database_id)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CollectionSource for NotionSource {
    fn name(&self) -> &str {
        "notion"
    }

    #[tracing::instrument(skip(self, request), fields(source = "notion", cursor = ?request.start_cursor))]
    async fn query_page(&self, request: &PageRequest) -> Result<PageResponse, SourceError> {
        let endpoint = format!(
            "databases/{}/query",
            urlencoding::encode(&self.database_id)
        );
        self.post(&endpoint, request).await
    }

    #[tracing::instrument(skip(self, request), fields(source = "notion"))]
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SourceError> {
        self.post("search", request).await
    }
}
