//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that walks an entry chain:
//! - Fetching the current entry page
//! - Extracting its fields and resolving the previous-entry link
//! - Handing the entry to the sink
//! - Deciding whether to continue, stop normally or abort
//!
//! Every stop is reported with a distinct reason; none of them discards the
//! entries the sink has already accepted.

use crate::crawler::state::CrawlState;
use crate::crawler::{FetchError, Fetcher};
use crate::entry::Entry;
use crate::extract::{extract, ExtractError, PreviousLink};
use crate::output::{EntrySink, SinkError};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// Why a single crawl step failed
#[derive(Debug, Error)]
pub enum StepError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Why a crawl stopped
#[derive(Debug)]
pub enum StopReason {
    /// The last entry had no previous link
    ChainEnded,

    /// The entry limit was reached
    LimitReached,

    /// A page could not be parsed; assumed to be the boundary of the chain
    ExtractFailed(ExtractError),

    /// A page or redirector could not be fetched
    FetchFailed(FetchError),

    /// The sink rejected an entry
    SinkFailed(SinkError),

    /// The user interrupted the crawl
    Interrupted,
}

impl StopReason {
    /// Returns true if the crawl stopped because something went wrong
    ///
    /// Extraction failures are not counted: a malformed page is treated as the
    /// end of the chain.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::FetchFailed(_) | Self::SinkFailed(_))
    }

    /// Short machine-readable code for the reason
    pub fn code(&self) -> &'static str {
        match self {
            Self::ChainEnded => "chain_ended",
            Self::LimitReached => "limit_reached",
            Self::ExtractFailed(_) => "extract_failed",
            Self::FetchFailed(_) => "fetch_failed",
            Self::SinkFailed(_) => "sink_failed",
            Self::Interrupted => "interrupted",
        }
    }
}

impl From<StepError> for StopReason {
    fn from(error: StepError) -> Self {
        match error {
            StepError::Fetch(e) => Self::FetchFailed(e),
            StepError::Extract(e) => Self::ExtractFailed(e),
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChainEnded => write!(f, "reached the first entry of the chain"),
            Self::LimitReached => write!(f, "reached the entry limit"),
            Self::ExtractFailed(e) => write!(f, "stopped at an unparsable page: {}", e),
            Self::FetchFailed(e) => write!(f, "fetch failed: {}", e),
            Self::SinkFailed(e) => write!(f, "output failed: {}", e),
            Self::Interrupted => write!(f, "interrupted"),
        }
    }
}

/// Outcome of a crawl run
#[derive(Debug)]
pub struct CrawlReport {
    /// Number of entries accepted by the sink
    pub entries: usize,

    /// Why the crawl stopped
    pub reason: StopReason,

    /// The URL that would have been fetched next, if any
    pub last_url: Option<String>,
}

/// Main crawler structure
pub struct Crawler {
    fetcher: Fetcher,
    max_entries: usize,
    interrupted: Arc<AtomicBool>,
}

impl Crawler {
    /// Creates a new crawler
    ///
    /// # Arguments
    ///
    /// * `fetcher` - The fetcher used for entry and redirector pages
    /// * `max_entries` - The crawl stops after this many entries
    pub fn new(fetcher: Fetcher, max_entries: usize) -> Self {
        Self {
            fetcher,
            max_entries,
            interrupted: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Uses an externally owned interrupt flag (e.g. set by a Ctrl-C handler)
    pub fn with_interrupt(mut self, interrupted: Arc<AtomicBool>) -> Self {
        self.interrupted = interrupted;
        self
    }

    /// Returns the flag that stops the crawl when set
    ///
    /// The flag is checked between iterations only; an in-flight request is
    /// never cancelled.
    pub fn interrupt_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupted)
    }

    /// Runs the crawl loop from a seed URL
    ///
    /// Each iteration fetches the current entry, extracts it, hands it to the
    /// sink and moves to its previous link. Iterations are strictly sequential
    /// since the next URL is only known once the current page is parsed.
    ///
    /// # Arguments
    ///
    /// * `seed_url` - The most recent entry to start from
    /// * `sink` - Receives each entry exactly once
    pub async fn run(&self, seed_url: &str, sink: &mut dyn EntrySink) -> CrawlReport {
        let mut state = CrawlState::new(seed_url, self.max_entries);
        tracing::info!(
            "Starting crawl at {} (max {} entries)",
            seed_url,
            state.max_entries()
        );

        let reason = loop {
            let url = match state.next_url() {
                Ok(url) => url.to_string(),
                Err(reason) => break reason,
            };

            if self.interrupted.load(Ordering::SeqCst) {
                break StopReason::Interrupted;
            }

            let entry = match self.fetch_entry(&url).await {
                Ok(entry) => entry,
                Err(error) => break StopReason::from(error),
            };

            let previous_url = entry.previous_url.clone();
            if let Err(error) = sink.accept(entry) {
                break StopReason::SinkFailed(error);
            }

            state.advance(previous_url);
            tracing::debug!("{} entries so far", state.visited_count());
        };

        if reason.is_failure() {
            tracing::warn!(
                "Crawl stopped after {} entries: {}",
                state.visited_count(),
                reason
            );
        } else {
            tracing::info!(
                "Crawl stopped after {} entries: {}",
                state.visited_count(),
                reason
            );
        }

        CrawlReport {
            entries: state.visited_count(),
            reason,
            last_url: state.current_url().map(str::to_string),
        }
    }

    /// Fetches and extracts one entry, resolving its previous link
    pub async fn fetch_entry(&self, url: &str) -> Result<Entry, StepError> {
        let page = self.fetcher.fetch(url).await?;
        let extracted = extract(&page)?;

        let previous_url = match &extracted.previous {
            PreviousLink::None => None,
            PreviousLink::Direct(url) => Some(url.clone()),
            PreviousLink::Redirect(url) => Some(self.fetcher.resolve_redirect(url).await?),
        };

        Ok(extracted.into_entry(previous_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_reason_failure_classification() {
        assert!(!StopReason::ChainEnded.is_failure());
        assert!(!StopReason::LimitReached.is_failure());
        assert!(!StopReason::Interrupted.is_failure());
        assert!(!StopReason::ExtractFailed(ExtractError::MissingTitle {
            url: "https://alice.livejournal.com/1.html".to_string(),
        })
        .is_failure());
        assert!(StopReason::FetchFailed(FetchError::BadStatus {
            url: "https://alice.livejournal.com/1.html".to_string(),
            status: 404,
        })
        .is_failure());
    }

    #[test]
    fn test_step_error_maps_to_distinct_reasons() {
        let fetch = StepError::from(FetchError::UnresolvedRedirect {
            url: "https://www.livejournal.com/go.bml".to_string(),
        });
        assert_eq!(StopReason::from(fetch).code(), "fetch_failed");

        let extract = StepError::from(ExtractError::MissingBody {
            url: "https://alice.livejournal.com/1.html".to_string(),
        });
        assert_eq!(StopReason::from(extract).code(), "extract_failed");
    }

    #[tokio::test]
    async fn test_interrupt_before_first_fetch() {
        let fetcher = Fetcher::new(reqwest::Client::new());
        let crawler = Crawler::new(fetcher, 10);
        crawler.interrupt_handle().store(true, Ordering::SeqCst);

        let mut entries: Vec<Entry> = Vec::new();
        let report = crawler
            .run("http://127.0.0.1:9/never-fetched.html", &mut entries)
            .await;

        assert_eq!(report.entries, 0);
        assert!(matches!(report.reason, StopReason::Interrupted));
        assert_eq!(
            report.last_url.as_deref(),
            Some("http://127.0.0.1:9/never-fetched.html")
        );
        assert!(entries.is_empty());
    }
}
