//! Entry extraction from fetched pages
//!
//! This module turns a fetched page into entry fields by dispatching on the
//! page's template variant. Extraction is a pure function of the page: the
//! same page always yields the same result. Following a redirector link to
//! find the previous entry needs the network and is left to the crawler.

mod html;
mod templates;
mod variant;

pub use html::{canonical_url, normalize_spaces, visible_text};
pub use variant::TemplateVariant;

use crate::crawler::FetchedPage;
use crate::entry::Entry;
use chrono::NaiveDateTime;
use scraper::Html;
use templates::{strategy_for, TimestampField};
use thiserror::Error;

/// Publication time format shared by all dated layouts (e.g. `2013-12-13 20:59:00`)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const TIMESTAMP_LEN: usize = "2013-12-13 20:59:00".len();

/// Errors raised when a required field cannot be extracted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("No title found on {url}")]
    MissingTitle { url: String },

    #[error("No body container found on {url}")]
    MissingBody { url: String },

    #[error("Missing or unparsable publication time on {url} (found {raw:?})")]
    MissingTimestamp { url: String, raw: Option<String> },
}

/// Where the chronologically previous entry lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviousLink {
    /// No previous entry: the chain ends here
    None,

    /// The link points straight at the previous entry
    Direct(String),

    /// The link points at a redirector page whose canonical URL is the previous entry
    Redirect(String),
}

/// Fields extracted from one page, before the previous link is resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPage {
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    pub published_at: Option<NaiveDateTime>,
    pub previous: PreviousLink,
}

impl ExtractedPage {
    /// Finalizes the entry once the previous link has been resolved
    pub fn into_entry(self, previous_url: Option<String>) -> Entry {
        Entry {
            title: self.title,
            body: self.body,
            tags: self.tags,
            published_at: self.published_at,
            previous_url,
        }
    }
}

/// Extracts entry fields from a fetched page
///
/// # Arguments
///
/// * `page` - The fetched page, annotated with its template variant
///
/// # Returns
///
/// * `Ok(ExtractedPage)` - Title, body, tags, optional timestamp and previous link
/// * `Err(ExtractError)` - A required field is missing or unparsable
///
/// A missing tags container yields an empty tag list and a missing previous
/// link yields `PreviousLink::None`; neither is an error.
///
/// # Example
///
/// ```
/// use lj_chain::crawler::FetchedPage;
/// use lj_chain::extract::{extract, PreviousLink};
/// use lj_chain::TemplateVariant;
///
/// let page = FetchedPage {
///     url: "https://alice.livejournal.com/1.html?format=light".to_string(),
///     variant: TemplateVariant::Light,
///     body: r#"<h1 class="entry-title">Hi</h1><article class="entry-content">Text</article>"#
///         .to_string(),
/// };
/// let extracted = extract(&page).unwrap();
/// assert_eq!(extracted.title, "Hi");
/// assert_eq!(extracted.previous, PreviousLink::None);
/// ```
pub fn extract(page: &FetchedPage) -> Result<ExtractedPage, ExtractError> {
    let strategy = strategy_for(page.variant);
    let mut document = Html::parse_document(&page.body);

    let title = strategy
        .title(&document)
        .ok_or_else(|| ExtractError::MissingTitle {
            url: page.url.clone(),
        })?;

    let tags = strategy.take_tags(&mut document);

    let body = strategy
        .body(&document)
        .ok_or_else(|| ExtractError::MissingBody {
            url: page.url.clone(),
        })?;
    let body = normalize_spaces(&body).trim().to_string();

    let published_at = match strategy.timestamp(&document) {
        TimestampField::NotExposed => None,
        TimestampField::Missing => {
            return Err(ExtractError::MissingTimestamp {
                url: page.url.clone(),
                raw: None,
            })
        }
        TimestampField::Raw(raw) => match parse_timestamp(&raw) {
            Some(timestamp) => Some(timestamp),
            None => {
                return Err(ExtractError::MissingTimestamp {
                    url: page.url.clone(),
                    raw: Some(raw),
                })
            }
        },
    };

    let previous = strategy.previous(&document, &page.url);

    tracing::debug!(
        "Extracted '{}' ({} variant, {} tags, previous: {:?})",
        title,
        page.variant,
        tags.len(),
        previous
    );

    Ok(ExtractedPage {
        title,
        body,
        tags,
        published_at,
        previous,
    })
}

/// Parses a `YYYY-MM-DD HH:MM:SS` publication time
///
/// A trailing timezone (`Z`, `UTC`, `+04:00`, `-0500`, `+04`) is discarded;
/// any other trailing text makes the value unparsable.
///
/// # Examples
///
/// ```
/// use lj_chain::extract::parse_timestamp;
///
/// assert!(parse_timestamp("2013-12-13 20:59:00").is_some());
/// assert!(parse_timestamp("2013-12-13 20:59:00 +04:00").is_some());
/// assert!(parse_timestamp("December 13th").is_none());
/// ```
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    let stamp = raw.get(..TIMESTAMP_LEN)?;
    let offset = raw.get(TIMESTAMP_LEN..)?.trim();

    if !is_discardable_offset(offset) {
        return None;
    }

    NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).ok()
}

fn is_discardable_offset(offset: &str) -> bool {
    if offset.is_empty() || offset == "Z" || offset.eq_ignore_ascii_case("UTC") {
        return true;
    }

    let Some(digits) = offset
        .strip_prefix('+')
        .or_else(|| offset.strip_prefix('-'))
    else {
        return false;
    };

    let digits: Vec<char> = digits.chars().filter(|c| *c != ':').collect();
    matches!(digits.len(), 2 | 4) && digits.iter().all(|c| c.is_ascii_digit())
}
