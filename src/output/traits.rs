//! Output sink trait and error types
//!
//! A sink receives extracted entries one at a time, in crawl order, and is
//! finalized once after the crawl stops for any reason.

use crate::entry::Entry;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for output operations
pub type SinkResult<T> = Result<T, SinkError>;

/// Trait for entry sinks
///
/// Sinks are used from a single crawl loop; an implementation shared with
/// other consumers must serialize its own writes.
pub trait EntrySink {
    /// Accepts one extracted entry
    ///
    /// # Arguments
    ///
    /// * `entry` - The entry, handed over exactly once
    fn accept(&mut self, entry: Entry) -> SinkResult<()>;

    /// Flushes everything accepted so far
    ///
    /// Called after the crawl stops, whatever the reason, so partial results
    /// are kept.
    fn finish(&mut self) -> SinkResult<()> {
        Ok(())
    }
}

/// In-memory accumulation, in crawl order
impl EntrySink for Vec<Entry> {
    fn accept(&mut self, entry: Entry) -> SinkResult<()> {
        self.push(entry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str) -> Entry {
        Entry {
            title: title.to_string(),
            body: "Body".to_string(),
            tags: vec![],
            published_at: None,
            previous_url: None,
        }
    }

    #[test]
    fn test_vec_sink_keeps_order() {
        let mut sink: Vec<Entry> = Vec::new();
        sink.accept(entry("newest")).unwrap();
        sink.accept(entry("older")).unwrap();
        sink.finish().unwrap();

        let titles: Vec<_> = sink.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["newest", "older"]);
    }
}
