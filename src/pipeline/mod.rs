//! End-to-end collection pipeline: fetch, normalize, report.
//!
//! ```no_run
//! use eventfeed_core::pipeline::CollectionPipeline;
//! use eventfeed_core::source::NotionSource;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let source = NotionSource::new("secret_token", "database-id")?;
//! let events = CollectionPipeline::default().run(&source).await;
//! println!("{}", serde_json::to_string(&events)?);
//! # Ok(())
//! # }
//! ```

use std::fmt;

use serde_json::Value;
use tracing::info;

use crate::fetch::{PaginatedFetcher, RetrievalStrategy};
use crate::normalize::{NormalizedRecord, RecordNormalizer};
use crate::source::CollectionSource;

/// Counts from one pipeline pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Raw records received from the source.
    pub fetched: usize,
    /// Records that survived normalization.
    pub kept: usize,
    /// Records discarded for lack of a title.
    pub skipped: usize,
}

impl fmt::Display for PipelineStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Fetched {} records ({} kept, {} skipped)",
            self.fetched, self.kept, self.skipped
        )
    }
}

/// Normalized records together with the diagnostics of the pass.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Normalized records in source order.
    pub records: Vec<NormalizedRecord>,
    pub stats: PipelineStats,
    /// Retrieval strategy that produced the raw records.
    pub strategy: RetrievalStrategy,
}

/// Fetches a collection and normalizes every record, preserving source order.
///
/// Holds no per-run state, so one pipeline can serve concurrent invocations.
#[derive(Debug, Clone, Default)]
pub struct CollectionPipeline {
    fetcher: PaginatedFetcher,
    normalizer: RecordNormalizer,
}

impl CollectionPipeline {
    /// Creates a pipeline from its parts.
    #[must_use]
    pub fn new(fetcher: PaginatedFetcher, normalizer: RecordNormalizer) -> Self {
        Self {
            fetcher,
            normalizer,
        }
    }

    /// Creates a pipeline with the default fetcher and a custom normalizer.
    #[must_use]
    pub fn with_normalizer(normalizer: RecordNormalizer) -> Self {
        Self::new(PaginatedFetcher::new(), normalizer)
    }

    /// Runs the pipeline and returns only the normalized records.
    pub async fn run(&self, source: &dyn CollectionSource) -> Vec<NormalizedRecord> {
        self.run_with_report(source).await.records
    }

    /// Runs the pipeline and returns records plus counts and strategy.
    #[tracing::instrument(skip(self, source), fields(source = source.name()))]
    pub async fn run_with_report(&self, source: &dyn CollectionSource) -> PipelineReport {
        let raw = self.fetcher.fetch_all(source).await;
        let (records, stats) = self.normalize_all(&raw.records);

        info!(
            fetched = stats.fetched,
            kept = stats.kept,
            skipped = stats.skipped,
            strategy = %raw.strategy,
            "Pipeline complete"
        );

        PipelineReport {
            records,
            stats,
            strategy: raw.strategy,
        }
    }

    /// Normalizes already-fetched raw records in order, dropping discards.
    #[must_use]
    pub fn normalize_all(&self, raw: &[Value]) -> (Vec<NormalizedRecord>, PipelineStats) {
        let records: Vec<NormalizedRecord> = raw
            .iter()
            .filter_map(|record| self.normalizer.normalize(record))
            .collect();

        let stats = PipelineStats {
            fetched: raw.len(),
            kept: records.len(),
            skipped: raw.len() - records.len(),
        };
        (records, stats)
    }
}
