//! Field-extraction strategies, one per template variant
//!
//! Every strategy answers the same five questions about a parsed page:
//! title, tags, body, publication time and previous-entry link. Adding a
//! layout means adding a strategy here and a detection rule in `variant`.

use super::html::{
    detach_all, element_attr, element_text, link_texts, select_first, strip_trailing_marker,
    visible_text_of,
};
use super::variant::TemplateVariant;
use super::PreviousLink;
use crate::url::resolve_link;
use scraper::Html;

/// Tags container used by the site scheme and journal styles
const LJ_TAGS: &str = "div.ljtags";

/// Label left behind in plain-text bodies once the tag links are gone
const TAGS_MARKER: &str = "Tags:";

/// What a strategy found for the publication time
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TimestampField {
    /// The layout never shows a publication time
    NotExposed,

    /// The layout should show one but the element is absent
    Missing,

    /// Raw text or attribute value, not yet parsed
    Raw(String),
}

/// Extraction rules for one HTML layout
pub(crate) trait TemplateStrategy {
    fn title(&self, document: &Html) -> Option<String>;

    /// Collects tags; may remove the tags subtree so it does not leak into the body
    fn take_tags(&self, document: &mut Html) -> Vec<String>;

    fn body(&self, document: &Html) -> Option<String>;

    fn timestamp(&self, _document: &Html) -> TimestampField {
        TimestampField::NotExposed
    }

    fn previous(&self, document: &Html, page_url: &str) -> PreviousLink;
}

/// Returns the strategy for a variant
pub(crate) fn strategy_for(variant: TemplateVariant) -> &'static dyn TemplateStrategy {
    match variant {
        TemplateVariant::Light => &LightTemplate,
        TemplateVariant::Dated => &DatedTemplate,
        TemplateVariant::Journal => &JournalTemplate,
        TemplateVariant::Reverse => &ReverseTemplate,
    }
}

/// Site scheme, light format
struct LightTemplate;

impl TemplateStrategy for LightTemplate {
    fn title(&self, document: &Html) -> Option<String> {
        select_first(document, "h1.entry-title").and_then(element_text)
    }

    fn take_tags(&self, document: &mut Html) -> Vec<String> {
        take_lj_tags(document)
    }

    fn body(&self, document: &Html) -> Option<String> {
        select_first(document, "article.entry-content").map(|article| article.inner_html())
    }

    fn previous(&self, document: &Html, page_url: &str) -> PreviousLink {
        // The control points at go.bml, which only redirects to the real entry
        match href_of(document, "a.b-controls-prev", page_url) {
            Some(url) => PreviousLink::Redirect(url),
            None => PreviousLink::None,
        }
    }
}

/// Site scheme with `time.dt-published`
struct DatedTemplate;

impl TemplateStrategy for DatedTemplate {
    fn title(&self, document: &Html) -> Option<String> {
        LightTemplate.title(document)
    }

    fn take_tags(&self, document: &mut Html) -> Vec<String> {
        LightTemplate.take_tags(document)
    }

    fn body(&self, document: &Html) -> Option<String> {
        LightTemplate.body(document)
    }

    fn timestamp(&self, document: &Html) -> TimestampField {
        match select_first(document, "time.dt-published").and_then(element_text) {
            Some(raw) => TimestampField::Raw(raw),
            None => TimestampField::Missing,
        }
    }

    fn previous(&self, document: &Html, page_url: &str) -> PreviousLink {
        LightTemplate.previous(document, page_url)
    }
}

/// The journal owner's own style
struct JournalTemplate;

impl TemplateStrategy for JournalTemplate {
    fn title(&self, document: &Html) -> Option<String> {
        select_first(document, r#"meta[property="og:title"]"#)
            .and_then(|meta| element_attr(meta, "content"))
    }

    fn take_tags(&self, document: &mut Html) -> Vec<String> {
        take_lj_tags(document)
    }

    fn body(&self, document: &Html) -> Option<String> {
        select_first(document, "div.entry-content")
            .map(|content| strip_trailing_marker(&visible_text_of(content), TAGS_MARKER))
    }

    fn previous(&self, document: &Html, page_url: &str) -> PreviousLink {
        match href_of(document, "a.prev-entry", page_url) {
            Some(url) => PreviousLink::Direct(url),
            None => PreviousLink::None,
        }
    }
}

/// Asset layout served after a `dir=prev` redirect
struct ReverseTemplate;

impl TemplateStrategy for ReverseTemplate {
    fn title(&self, document: &Html) -> Option<String> {
        select_first(document, "h2.asset-name").and_then(element_text)
    }

    fn take_tags(&self, document: &mut Html) -> Vec<String> {
        link_texts(document, "div.asset-tags")
    }

    fn body(&self, document: &Html) -> Option<String> {
        select_first(document, "div.asset-body").map(|body| body.inner_html())
    }

    fn timestamp(&self, document: &Html) -> TimestampField {
        match select_first(document, "abbr.published").and_then(|abbr| element_attr(abbr, "title"))
        {
            Some(raw) => TimestampField::Raw(raw),
            None => TimestampField::Missing,
        }
    }

    fn previous(&self, document: &Html, page_url: &str) -> PreviousLink {
        match href_of(document, r#"a[rel="prev"]"#, page_url) {
            Some(url) => PreviousLink::Direct(url),
            None => PreviousLink::None,
        }
    }
}

fn take_lj_tags(document: &mut Html) -> Vec<String> {
    let tags = link_texts(document, LJ_TAGS);
    detach_all(document, LJ_TAGS);
    tags
}

fn href_of(document: &Html, selector: &str, page_url: &str) -> Option<String> {
    let anchor = select_first(document, selector)?;
    let href = element_attr(anchor, "href")?;
    resolve_link(&href, page_url)
}
