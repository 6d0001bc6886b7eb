//! Traversal state for a single crawl run

use super::StopReason;

/// Current position in the chain and progress toward the entry limit
///
/// Owned by the crawler; a fresh state is created for every run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlState {
    current_url: Option<String>,
    visited_count: usize,
    max_entries: usize,
}

impl CrawlState {
    /// Creates the initial state for a seed URL
    pub fn new(seed_url: impl Into<String>, max_entries: usize) -> Self {
        Self {
            current_url: Some(seed_url.into()),
            visited_count: 0,
            max_entries,
        }
    }

    /// Returns the URL to fetch next, or why the crawl must stop
    ///
    /// The crawl stops when there is no current URL (the chain ended) or when
    /// the entry limit has been reached. A chain that ends exactly at the limit
    /// is reported as ended.
    pub fn next_url(&self) -> Result<&str, StopReason> {
        let url = self.current_url.as_deref().ok_or(StopReason::ChainEnded)?;

        if self.visited_count >= self.max_entries {
            return Err(StopReason::LimitReached);
        }

        Ok(url)
    }

    /// Records an accepted entry and moves on to its previous link
    pub fn advance(&mut self, previous_url: Option<String>) {
        self.visited_count += 1;
        self.current_url = previous_url;
    }

    pub fn current_url(&self) -> Option<&str> {
        self.current_url.as_deref()
    }

    pub fn visited_count(&self) -> usize {
        self.visited_count
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }
}
