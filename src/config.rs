//! Configuration loading: source access parameters and field tables.
//!
//! Only the binary calls into this module. The fetch and normalization core
//! receive already-built sources and tables and never read the environment.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::normalize::FieldTable;
use crate::source::DEFAULT_BASE_URL;

/// Environment variable holding the integration token.
pub const API_KEY_VAR: &str = "NOTION_API_KEY";
/// Environment variable holding the database id.
pub const DATABASE_ID_VAR: &str = "NOTION_DATABASE_ID";
/// Optional environment variable overriding the API base URL.
pub const BASE_URL_VAR: &str = "NOTION_API_BASE_URL";

/// Errors that make an invocation impossible to start.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required access parameter is missing or blank.
    #[error("{name} is not configured\n  Suggestion: export {name} before running")]
    Missing {
        /// The variable that is missing.
        name: &'static str,
    },

    /// The API base URL cannot be used.
    #[error("invalid API base URL '{url}': {reason}\n  Suggestion: use an absolute http(s) URL such as https://api.notion.com/v1")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The field table file could not be read.
    #[error("cannot read field table {path}: {source}")]
    FieldTableIo {
        /// The file that failed to load.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The field table file is not a valid table.
    #[error("invalid field table {path}: {source}\n  Suggestion: check key names against the built-in table")]
    FieldTableFormat {
        /// The file that failed to parse.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}

/// Access parameters for the collection source.
#[derive(Clone, PartialEq, Eq)]
pub struct SourceConfig {
    /// Integration token sent as a bearer credential.
    pub api_key: String,
    /// Database to query.
    pub database_id: String,
    /// API base URL, `https://api.notion.com/v1` unless overridden.
    pub base_url: String,
}

impl SourceConfig {
    /// Reads access parameters from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or the base
    /// URL is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads access parameters through `lookup`.
    ///
    /// Values are trimmed of whitespace and one layer of surrounding quotes,
    /// since deployment dashboards often store them quoted.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or the base
    /// URL is invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &'static str| {
            lookup(name)
                .map(|value| clean_value(&value))
                .filter(|value| !value.is_empty())
        };

        let api_key = read(API_KEY_VAR).ok_or(ConfigError::Missing { name: API_KEY_VAR })?;
        let database_id = read(DATABASE_ID_VAR).ok_or(ConfigError::Missing {
            name: DATABASE_ID_VAR,
        })?;
        let base_url = read(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        validate_base_url(&base_url)?;

        debug!(%base_url, "Source configuration loaded");
        Ok(Self {
            api_key,
            database_id,
            base_url,
        })
    }
}

impl std::fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceConfig")
            .field("database_id", &self.database_id)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Trims whitespace, then any surrounding double and single quotes.
fn clean_value(raw: &str) -> String {
    raw.trim()
        .trim_matches('"')
        .trim_matches('\'')
        .to_string()
}

fn validate_base_url(raw: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: reason.to_string(),
    };
    let parsed = Url::parse(raw).map_err(|e| invalid(&e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(&format!("unsupported scheme '{other}'"))),
    }
}

/// Loads a JSON field table. Entries missing from the file keep their defaults.
///
/// # Errors
///
/// Returns [`ConfigError`] when the file cannot be read or parsed.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_field_table(path: &Path) -> Result<FieldTable, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::FieldTableIo {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::FieldTableFormat {
        path: path.to_path_buf(),
        source,
    })
}
