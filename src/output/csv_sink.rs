//! Tabular export: one CSV row per entry
//!
//! Columns are `title`, `text` and `tags`. The text column holds the visible
//! text of the body and tags are joined with `||`.

use crate::entry::Entry;
use crate::extract::visible_text;
use crate::output::traits::{EntrySink, SinkResult};
use csv::Writer;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Header row of the export
pub const CSV_HEADER: [&str; 3] = ["title", "text", "tags"];

/// Delimiter between tags in the tags column
pub const TAG_DELIMITER: &str = "||";

/// Writes entries as rows of a CSV file
pub struct CsvSink {
    writer: Writer<File>,
    path: PathBuf,
    rows: usize,
}

impl CsvSink {
    /// Creates (or truncates) the CSV file and writes the header row
    pub fn create(path: &Path) -> SinkResult<Self> {
        let mut writer = Writer::from_path(path)?;
        writer.write_record(CSV_HEADER)?;

        Ok(Self {
            writer,
            path: path.to_path_buf(),
            rows: 0,
        })
    }

    /// Export file name for a journal: `<username>_lj_blog.csv`
    pub fn path_for(destination: &Path, username: &str) -> PathBuf {
        destination.join(format!("{}_lj_blog.csv", username))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of entry rows written so far
    pub fn rows(&self) -> usize {
        self.rows
    }
}

impl EntrySink for CsvSink {
    fn accept(&mut self, entry: Entry) -> SinkResult<()> {
        let text = visible_text(&entry.body);
        let tags = entry.joined_tags(TAG_DELIMITER);

        self.writer
            .write_record([entry.title.as_str(), text.as_str(), tags.as_str()])?;
        self.rows += 1;
        Ok(())
    }

    fn finish(&mut self) -> SinkResult<()> {
        self.writer.flush()?;
        tracing::info!("Wrote {} rows to {}", self.rows, self.path.display());
        Ok(())
    }
}
