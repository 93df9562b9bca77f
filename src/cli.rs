//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use eventfeed_core::source::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_READ_TIMEOUT_SECS};

/// Fetch event pages from a Notion database and print them as a flat JSON feed.
///
/// Access parameters come from NOTION_API_KEY and NOTION_DATABASE_ID
/// (NOTION_API_BASE_URL optionally overrides the API endpoint).
#[derive(Parser, Debug)]
#[command(name = "eventfeed")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Database to query (overrides NOTION_DATABASE_ID)
    #[arg(short = 'd', long)]
    pub database_id: Option<String>,

    /// JSON file overriding property candidate names
    #[arg(short = 'f', long, value_name = "PATH")]
    pub field_table: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pub pretty: bool,

    /// Print fetched/kept/skipped counts to stderr
    #[arg(short, long)]
    pub stats: bool,

    /// HTTP connect timeout in seconds (1-300)
    #[arg(long, default_value_t = DEFAULT_CONNECT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=300))]
    pub connect_timeout: u64,

    /// HTTP read timeout in seconds (1-600)
    #[arg(long, default_value_t = DEFAULT_READ_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=600))]
    pub read_timeout: u64,
}
