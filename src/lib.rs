//! Eventfeed Core Library
//!
//! This library fetches event pages from a Notion-style database, where every
//! page carries its own user-edited schema of typed properties, and normalizes
//! them into a flat, stable record shape for feed clients.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`property`] - Lenient scalar extraction from property bags
//! - [`normalize`] - Candidate-name tables and record normalization
//! - [`fetch`] - Cursor pagination with a search fallback
//! - [`pipeline`] - Fetch → normalize orchestration with skip counts
//! - [`source`] - Collection source trait and the Notion HTTP source
//! - [`config`] - Access parameters and field-table loading

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod fetch;
pub mod normalize;
pub mod pipeline;
pub mod property;
pub mod source;
mod user_agent;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use config::{ConfigError, SourceConfig, load_field_table};
pub use fetch::{PaginatedFetcher, RawCollectionResult, RetrievalStrategy};
pub use normalize::{FieldCandidate, FieldTable, NormalizedRecord, RecordNormalizer};
pub use pipeline::{CollectionPipeline, PipelineReport, PipelineStats};
pub use property::{PropertyBag, extract};
pub use source::{CollectionSource, HttpTimeouts, NotionSource, SourceError};
