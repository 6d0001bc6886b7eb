//! lj-chain main entry point
//!
//! This is the command-line interface for walking a LiveJournal entry chain
//! and exporting it as CSV or as Jekyll posts.

use anyhow::Context;
use clap::Parser;
use lj_chain::config::{load_config_with_hash, validate, Config, OutputFormat};
use lj_chain::crawler::{Crawler, Fetcher, StopReason};
use lj_chain::output::open_sink;
use lj_chain::url::{parse_seed_url, username_from_url};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::Ordering;
use tracing_subscriber::EnvFilter;

/// lj-chain: export a LiveJournal by following "previous entry" links
///
/// Starts from the given entry (usually the most recent one) and walks
/// backwards until the first entry, an unparsable page or the entry limit.
#[derive(Parser, Debug)]
#[command(name = "lj-chain")]
#[command(version)]
#[command(about = "Export a LiveJournal by walking its entry chain", long_about = None)]
struct Cli {
    /// URL of the entry to start from, e.g. http://username.livejournal.com/123.html
    #[arg(value_name = "SEED_URL")]
    seed_url: String,

    /// Path to a TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Maximum number of entries to export
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    max_entries: Option<u64>,

    /// Directory receiving the export
    #[arg(long, value_name = "DIR")]
    destination: Option<String>,

    /// Export format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Overwrite existing post files
    #[arg(short = 'f', long)]
    force_overwrite: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let seed = parse_seed_url(&cli.seed_url)
        .with_context(|| format!("Invalid seed URL '{}'", cli.seed_url))?;

    let config = build_config(&cli)?;
    let username = username_from_url(&seed);

    let mut sink = open_sink(&config.output, &username).context("Failed to open output")?;
    let fetcher = Fetcher::from_config(&config.http).context("Failed to build HTTP client")?;
    let crawler = Crawler::new(fetcher, config.crawl.max_entries);

    // Ctrl-C stops the crawl between entries; what was exported stays
    let interrupted = crawler.interrupt_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping after the current entry");
            interrupted.store(true, Ordering::SeqCst);
        }
    });

    let report = crawler.run(seed.as_str(), sink.as_mut()).await;

    // Always flush, whatever stopped the crawl
    sink.finish().context("Failed to finalize output")?;

    if !cli.quiet {
        println!(
            "Exported {} entries for {} ({}: {})",
            report.entries,
            username,
            report.reason.code(),
            report.reason
        );
        match &report.reason {
            StopReason::FetchFailed(error) => println!("Failed URL: {}", error.url()),
            reason if reason.is_failure() => {
                if let Some(url) = &report.last_url {
                    println!("Stopped at {}", url);
                }
            }
            _ => {}
        }
    }

    match report.reason {
        StopReason::SinkFailed(_) => Ok(ExitCode::FAILURE),
        _ => Ok(ExitCode::SUCCESS),
    }
}

/// Loads the optional config file and applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(max_entries) = cli.max_entries {
        config.crawl.max_entries = usize::try_from(max_entries).unwrap_or(usize::MAX);
    }
    if let Some(destination) = &cli.destination {
        config.output.destination = destination.clone();
    }
    if let Some(format) = cli.format {
        config.output.format = format;
    }
    if cli.force_overwrite {
        config.output.overwrite = true;
    }

    validate(&config)?;
    Ok(config)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("lj_chain=info,warn"),
            1 => EnvFilter::new("lj_chain=debug,info"),
            2 => EnvFilter::new("lj_chain=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
