//! The extracted blog entry record

use chrono::NaiveDateTime;

/// One extracted blog entry
///
/// Built once per successfully parsed page and handed to a sink exactly once.
/// Entries never reference each other; the chain only exists as the sequence
/// of `previous_url` values followed during a crawl.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Entry title, never empty
    pub title: String,

    /// Entry content, either an HTML fragment or plain text depending on the template
    pub body: String,

    /// Tags in document order (may be empty)
    pub tags: Vec<String>,

    /// Publication time, only for templates that expose one
    pub published_at: Option<NaiveDateTime>,

    /// URL of the chronologically earlier entry; `None` ends the chain
    pub previous_url: Option<String>,
}

impl Entry {
    /// Tags joined with the given delimiter
    pub fn joined_tags(&self, delimiter: &str) -> String {
        self.tags.join(delimiter)
    }
}
