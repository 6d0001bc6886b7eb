//! Per-entry post files for a Jekyll site
//!
//! Each entry becomes `<YYYY-MM-DD>-<slug>.html` with a small front matter
//! block followed by the body markup.

use crate::entry::Entry;
use crate::output::traits::{EntrySink, SinkResult};
use chrono::NaiveDate;
use deunicode::deunicode;
use std::fs;
use std::path::{Path, PathBuf};

/// Fixed front matter lines written for every post
const HEADERS: [&str; 2] = ["categories: blog", "layout: post"];

/// File extension of generated posts
const POST_EXTENSION: &str = "html";

/// Writes one file per entry
pub struct JekyllSink {
    destination: PathBuf,
    overwrite: bool,
    fallback_date: NaiveDate,
    written: usize,
    skipped: usize,
}

impl JekyllSink {
    /// Creates a sink writing into an existing directory
    ///
    /// # Arguments
    ///
    /// * `destination` - Directory receiving the posts
    /// * `overwrite` - Replace posts that already exist
    /// * `fallback_date` - Date used for entries without a publication time
    pub fn new(destination: &Path, overwrite: bool, fallback_date: NaiveDate) -> Self {
        Self {
            destination: destination.to_path_buf(),
            overwrite,
            fallback_date,
            written: 0,
            skipped: 0,
        }
    }

    /// Number of posts written
    pub fn written(&self) -> usize {
        self.written
    }

    /// Number of posts left alone because the file already existed
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl EntrySink for JekyllSink {
    fn accept(&mut self, entry: Entry) -> SinkResult<()> {
        let path = self
            .destination
            .join(post_filename(&entry, self.fallback_date));

        if path.exists() && !self.overwrite {
            tracing::warn!(
                "{} already exists, not overwriting (use --force-overwrite)",
                path.display()
            );
            self.skipped += 1;
            return Ok(());
        }

        fs::write(&path, format_post(&entry))?;
        tracing::debug!("Wrote {}", path.display());
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> SinkResult<()> {
        tracing::info!(
            "Wrote {} posts to {} ({} skipped)",
            self.written,
            self.destination.display(),
            self.skipped
        );
        Ok(())
    }
}

/// Encodes a title so it can be used in a post file name
///
/// Jekyll handles spaces and non-Latin characters in file names poorly, so the
/// title is transliterated to ASCII, spaces become hyphens and the rest is
/// percent-encoded.
///
/// # Examples
///
/// ```
/// use lj_chain::output::slugify;
///
/// assert_eq!(slugify("Crème brûlée"), "Creme-brulee");
/// assert_eq!(slugify("Q&A time"), "Q%26A-time");
/// ```
pub fn slugify(title: &str) -> String {
    let latin = deunicode(title);
    urlencoding::encode(&latin.replace(' ', "-")).into_owned()
}

/// File name of the post for an entry
pub fn post_filename(entry: &Entry, fallback_date: NaiveDate) -> String {
    let date = entry
        .published_at
        .map(|timestamp| timestamp.date())
        .unwrap_or(fallback_date);

    format!(
        "{}-{}.{}",
        date.format("%Y-%m-%d"),
        slugify(&entry.title),
        POST_EXTENSION
    )
}

/// Formats an entry as a post: front matter, then the body
pub fn format_post(entry: &Entry) -> String {
    let mut post = String::new();

    post.push_str("---\n");
    post.push_str(&format!("title: \"{}\"\n", escape_quoted(&entry.title)));
    for header in HEADERS {
        post.push_str(header);
        post.push('\n');
    }
    post.push_str(&format!("tags: {}\n", entry.joined_tags(" ")));
    post.push_str("---\n");

    post.push_str(entry.body.trim());
    post.push('\n');

    post
}

fn escape_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(title: &str, published_at: Option<&str>) -> Entry {
        Entry {
            title: title.to_string(),
            body: "<p>Snow</p>".to_string(),
            tags: vec!["winter".to_string(), "photos".to_string()],
            published_at: published_at.map(|raw| {
                chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").unwrap()
            }),
            previous_url: None,
        }
    }

    fn fallback() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, 2).unwrap()
    }

    #[test]
    fn test_slugify_spaces() {
        assert_eq!(slugify("Winter in the city"), "Winter-in-the-city");
    }

    #[test]
    fn test_slugify_transliterates() {
        assert_eq!(slugify("Café au lait"), "Cafe-au-lait");
        assert!(slugify("Москва").is_ascii());
    }

    #[test]
    fn test_slugify_percent_encodes() {
        assert_eq!(slugify("50/50?"), "50%2F50%3F");
    }

    #[test]
    fn test_post_filename_uses_publication_date() {
        let name = post_filename(&entry("Winter", Some("2013-12-13 20:59:00")), fallback());
        assert_eq!(name, "2013-12-13-Winter.html");
    }

    #[test]
    fn test_post_filename_falls_back_to_crawl_date() {
        let name = post_filename(&entry("Winter", None), fallback());
        assert_eq!(name, "2020-01-02-Winter.html");
    }

    #[test]
    fn test_format_post() {
        let post = format_post(&entry("Say \"hi\"", None));
        assert_eq!(
            post,
            concat!(
                "---\ntitle: \"Say \\\"hi\\\"\"\n",
                "categories: blog\nlayout: post\ntags: winter photos\n",
                "---\n<p>Snow</p>\n"
            )
        );
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let existing = dir.path().join("2013-12-13-Winter.html");
        fs::write(&existing, "keep me").unwrap();

        let mut sink = JekyllSink::new(dir.path(), false, fallback());
        sink.accept(entry("Winter", Some("2013-12-13 20:59:00"))).unwrap();
        sink.finish().unwrap();

        assert_eq!(fs::read_to_string(&existing).unwrap(), "keep me");
        assert_eq!(sink.written(), 0);
        assert_eq!(sink.skipped(), 1);
    }

    #[test]
    fn test_overwrites_when_forced() {
        let dir = TempDir::new().unwrap();
        let existing = dir.path().join("2013-12-13-Winter.html");
        fs::write(&existing, "old").unwrap();

        let mut sink = JekyllSink::new(dir.path(), true, fallback());
        sink.accept(entry("Winter", Some("2013-12-13 20:59:00"))).unwrap();

        assert!(fs::read_to_string(&existing).unwrap().contains("<p>Snow</p>"));
        assert_eq!(sink.written(), 1);
    }
}
