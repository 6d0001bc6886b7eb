//! Crawler module for walking an entry chain
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with variant detection
//! - Traversal state and termination rules
//! - Overall crawl coordination and stop reasons

mod coordinator;
mod fetcher;
mod state;

pub use coordinator::{CrawlReport, Crawler, StepError, StopReason};
pub use fetcher::{build_http_client, FetchError, FetchedPage, Fetcher};
pub use state::CrawlState;

use crate::config::{validate, Config};
use crate::output::EntrySink;
use crate::url::parse_seed_url;

/// Runs a complete crawl with the given configuration
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate the configuration and the seed URL
/// 2. Build the HTTP client
/// 3. Walk the chain from the seed URL
/// 4. Hand every entry to the sink
///
/// The sink is not finalized here; callers call `finish` once they are done
/// with the report.
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `seed_url` - The most recent entry of the chain
/// * `sink` - Receives the extracted entries
///
/// # Example
///
/// ```no_run
/// use lj_chain::config::Config;
/// use lj_chain::crawler::crawl;
/// use lj_chain::Entry;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut entries: Vec<Entry> = Vec::new();
/// let seed = "https://alice.livejournal.com/42.html";
/// let report = crawl(&Config::default(), seed, &mut entries).await?;
/// println!("{} entries, {}", report.entries, report.reason);
/// # Ok(())
/// # }
/// ```
pub async fn crawl(
    config: &Config,
    seed_url: &str,
    sink: &mut dyn EntrySink,
) -> crate::Result<CrawlReport> {
    validate(config)?;
    let seed = parse_seed_url(seed_url)?;

    let fetcher = Fetcher::from_config(&config.http)?;
    let crawler = Crawler::new(fetcher, config.crawl.max_entries);
    Ok(crawler.run(seed.as_str(), sink).await)
}
