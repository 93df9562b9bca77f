//! CLI entry point for the eventfeed tool.

use anyhow::Result;
use clap::Parser;
use eventfeed_core::config::DATABASE_ID_VAR;
use eventfeed_core::{
    CollectionPipeline, FieldTable, HttpTimeouts, NotionSource, RecordNormalizer, SourceConfig,
    load_field_table,
};
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // stdout carries only the JSON feed
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let config = SourceConfig::from_lookup(|name| {
        if name == DATABASE_ID_VAR && args.database_id.is_some() {
            return args.database_id.clone();
        }
        std::env::var(name).ok()
    })?;

    let table = match &args.field_table {
        Some(path) => load_field_table(path)?,
        None => FieldTable::default(),
    };

    let timeouts = HttpTimeouts {
        connect_secs: args.connect_timeout,
        read_secs: args.read_timeout,
    };
    let source = NotionSource::from_config(&config, timeouts)?;

    info!(database_id = source.database_id(), "Fetching events");

    let pipeline = CollectionPipeline::with_normalizer(RecordNormalizer::new(table));
    let report = pipeline.run_with_report(&source).await;

    if args.stats {
        eprintln!("{} via {} retrieval", report.stats, report.strategy);
    }

    let output = if args.pretty {
        serde_json::to_string_pretty(&report.records)?
    } else {
        serde_json::to_string(&report.records)?
    };
    println!("{output}");

    Ok(())
}
