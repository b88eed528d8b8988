//! Binary entry point for c64query.
//!
//! Runs one query against the knowledge base: enrich, classify, retrieve,
//! render. Results go to stdout; diagnostics and errors go to stderr so
//! the answer text stays clean.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stdout/print_stderr in main binary for CLI output
#![allow(clippy::print_stdout)]
#![allow(clippy::print_stderr)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use anyhow::Context;
use c64query::config::QueryConfig;
use c64query::{PipelineOptions, QueryPipeline};
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// c64query - hybrid retrieval for a Commodore 64 knowledge base.
#[derive(Parser)]
#[command(name = "c64query")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Free-text query; may mix prose with addresses, values and mnemonics.
    #[arg(required = true, trailing_var_arg = true)]
    query: Vec<String>,

    /// Maximum number of results to display.
    #[arg(short, long, default_value_t = QueryConfig::DEFAULT_LIMIT)]
    limit: usize,

    /// Skip enrichment and send the query verbatim.
    #[arg(long)]
    raw: bool,

    /// Print the enriched query and exit without retrieving.
    #[arg(long)]
    enrich_only: bool,

    /// Qdrant base URL.
    #[arg(long, env = "QDRANT_URL", default_value = QueryConfig::DEFAULT_QDRANT_URL)]
    qdrant_url: String,

    /// Collection holding the knowledge base.
    #[arg(long, env = "C64QUERY_COLLECTION", default_value = QueryConfig::DEFAULT_COLLECTION)]
    collection: String,

    /// Embedding model identifier.
    #[arg(
        long,
        env = "C64QUERY_EMBEDDING_MODEL",
        default_value = QueryConfig::DEFAULT_EMBEDDING_MODEL
    )]
    model: String,

    /// Embedding-provider API key.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("c64query=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("c64query=warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Main entry point.
fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the query command.
fn run(cli: Cli) -> anyhow::Result<()> {
    let query = cli.query.join(" ");

    let config = QueryConfig {
        qdrant_url: cli.qdrant_url,
        collection: cli.collection,
        embedding_model: cli.model,
        api_key: cli.api_key,
        ..QueryConfig::default()
    }
    .with_limit(cli.limit);

    let pipeline = QueryPipeline::new(config).context("failed to build query pipeline")?;

    // Fatal configuration and connectivity problems surface before any
    // retrieval work starts.
    if !cli.enrich_only {
        pipeline.ensure_credentials()?;
        pipeline.check_connection()?;
    }

    let outcome = pipeline.execute(
        &query,
        PipelineOptions {
            raw: cli.raw,
            enrich_only: cli.enrich_only,
        },
    )?;

    // Diagnostics to stderr; the answer text alone on stdout.
    if outcome.enriched_query != query {
        eprintln!("Enriched query:\n  {}", outcome.enriched_query.replace('\n', "\n  "));
    }
    if !outcome.filter_tags.is_empty() {
        eprintln!("Filter tags: {}", outcome.filter_tags.join(", "));
    }
    if !cli.enrich_only {
        eprintln!("Search mode: {}", outcome.mode);
        eprintln!();
    }

    println!("{}", outcome.formatted);
    Ok(())
}
