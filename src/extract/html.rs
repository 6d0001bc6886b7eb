//! Structural HTML helpers shared by the template strategies

use scraper::{ElementRef, Html, Node, Selector};

/// Elements whose text content is never visible
const INVISIBLE_PARENTS: &[&str] = &["style", "script", "head", "title"];

/// Delimiters around the URL in a serialized canonical meta element
const CONTENT_OPEN: &str = " content=\"";
const CONTENT_CLOSE: &str = "\"";

/// Returns the first element matching a CSS selector
pub(crate) fn select_first<'a>(document: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    let parsed = parse_selector(selector)?;
    let found = document.select(&parsed).next();
    if found.is_none() {
        tracing::debug!("No element matches '{}'", selector);
    }
    found
}

/// Returns the trimmed text content of an element, or None if it is empty
pub(crate) fn element_text(element: ElementRef<'_>) -> Option<String> {
    let text = element.text().collect::<String>();
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Returns a trimmed, non-empty attribute value
pub(crate) fn element_attr(element: ElementRef<'_>, name: &str) -> Option<String> {
    element
        .value()
        .attr(name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Collects the text of every link inside the matching containers, in document order
pub(crate) fn link_texts(document: &Html, container: &str) -> Vec<String> {
    let Some(selector) = parse_selector(&format!("{} a", container)) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(element_text)
        .collect()
}

/// Removes every element matching the selector (and its subtree) from the document
pub(crate) fn detach_all(document: &mut Html, selector: &str) {
    let Some(selector) = parse_selector(selector) else {
        return;
    };

    let ids: Vec<_> = document.select(&selector).map(|element| element.id()).collect();
    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// Visible text of an element: text nodes outside script/style, joined by single spaces
pub(crate) fn visible_text_of(element: ElementRef<'_>) -> String {
    let mut pieces = Vec::new();

    for node in element.descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let hidden = node
            .parent()
            .and_then(|parent| parent.value().as_element().map(|e| e.name()))
            .is_some_and(|name| INVISIBLE_PARENTS.contains(&name));
        if hidden {
            continue;
        }

        let piece = text.trim();
        if !piece.is_empty() {
            pieces.push(piece.to_string());
        }
    }

    pieces.join(" ")
}

/// Visible text of an HTML fragment, with non-breaking spaces normalized
///
/// # Examples
///
/// ```
/// use lj_chain::extract::visible_text;
///
/// let text = visible_text("<p>Hello <b>world</b></p><script>x()</script>");
/// assert_eq!(text, "Hello world");
/// ```
pub fn visible_text(fragment: &str) -> String {
    let document = Html::parse_fragment(fragment);
    normalize_spaces(&visible_text_of(document.root_element()))
}

/// Replaces non-breaking spaces (literal or `&nbsp;` entity) with regular spaces
pub fn normalize_spaces(text: &str) -> String {
    text.replace('\u{a0}', " ").replace("&nbsp;", " ")
}

/// Removes a trailing boilerplate marker (such as `Tags:`) from extracted text
///
/// The marker only counts as a separate word: "MetaTags" keeps its suffix.
pub(crate) fn strip_trailing_marker(text: &str, marker: &str) -> String {
    let trimmed = text.trim_end();
    let without_colon = marker.trim_end_matches(':');

    let stripped = strip_word_suffix(trimmed, marker)
        .or_else(|| strip_word_suffix(trimmed, without_colon))
        .unwrap_or(trimmed);

    stripped.trim_end().to_string()
}

fn strip_word_suffix<'a>(text: &'a str, word: &str) -> Option<&'a str> {
    let rest = text.strip_suffix(word)?;
    (rest.is_empty() || rest.ends_with(char::is_whitespace)).then_some(rest)
}

/// Finds the canonical URL a redirector page points at
///
/// The `og:url` meta element is located structurally; the URL is then read
/// from its serialized form between ` content="` and the closing quote.
pub fn canonical_url(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let meta = select_first(&document, r#"meta[property="og:url"]"#)?;
    let serialized = meta.html();

    let start = serialized.find(CONTENT_OPEN)? + CONTENT_OPEN.len();
    let length = serialized[start..].find(CONTENT_CLOSE)?;
    let url = html_escape::decode_html_entities(&serialized[start..start + length]);
    let url = url.trim();

    if url.is_empty() {
        None
    } else {
        Some(url.to_string())
    }
}

fn parse_selector(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::warn!("Invalid selector '{}': {:?}", selector, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_text_skips_script_and_style() {
        let html = "<div>One<script>var x = 1;</script><style>p {}</style> Two</div>";
        assert_eq!(visible_text(html), "One Two");
    }

    #[test]
    fn test_visible_text_skips_comments() {
        assert_eq!(visible_text("<p>Shown<!-- hidden --></p>"), "Shown");
    }

    #[test]
    fn test_normalize_spaces_literal_and_entity() {
        assert_eq!(normalize_spaces("a\u{a0}b"), "a b");
        assert_eq!(normalize_spaces("a&nbsp;b"), "a b");
    }

    #[test]
    fn test_strip_trailing_marker() {
        assert_eq!(strip_trailing_marker("Body text Tags:", "Tags:"), "Body text");
        assert_eq!(strip_trailing_marker("Body text Tags \n", "Tags:"), "Body text");
        assert_eq!(strip_trailing_marker("Body text", "Tags:"), "Body text");
        assert_eq!(strip_trailing_marker("Tags:", "Tags:"), "");
    }

    #[test]
    fn test_strip_trailing_marker_keeps_word_suffix() {
        assert_eq!(
            strip_trailing_marker("I finally learned about MetaTags", "Tags:"),
            "I finally learned about MetaTags"
        );
        assert_eq!(strip_trailing_marker("See MetaTags:", "Tags:"), "See MetaTags:");
    }

    #[test]
    fn test_detach_all() {
        let mut document =
            Html::parse_document(r#"<div id="a">keep<div class="ljtags"><a>t</a></div></div>"#);
        detach_all(&mut document, "div.ljtags");
        let div = select_first(&document, "div#a").unwrap();
        assert_eq!(visible_text_of(div), "keep");
    }

    #[test]
    fn test_link_texts_in_order() {
        let document = Html::parse_document(
            r#"<div class="ljtags">Tags: <a href="/t/b">beta</a>, <a href="/t/a">alpha</a></div>"#,
        );
        assert_eq!(link_texts(&document, "div.ljtags"), vec!["beta", "alpha"]);
    }

    #[test]
    fn test_canonical_url_decodes_entities() {
        let html = r#"<html><head>
            <meta charset="utf-8">
            <meta property="og:url" content="https://alice.livejournal.com/1.html?a=1&amp;b=2">
        </head><body></body></html>"#;
        assert_eq!(
            canonical_url(html),
            Some("https://alice.livejournal.com/1.html?a=1&b=2".to_string())
        );
    }

    #[test]
    fn test_canonical_url_attribute_order() {
        let html = r#"<meta content="https://alice.livejournal.com/7.html" property="og:url">"#;
        assert_eq!(
            canonical_url(html),
            Some("https://alice.livejournal.com/7.html".to_string())
        );
    }

    #[test]
    fn test_canonical_url_ignores_prefixed_attributes() {
        let html = concat!(
            r#"<meta data-content="x" property="og:url" "#,
            r#"content="https://alice.livejournal.com/8.html">"#
        );
        assert_eq!(
            canonical_url(html),
            Some("https://alice.livejournal.com/8.html".to_string())
        );
    }

    #[test]
    fn test_canonical_url_missing() {
        let html = r#"<meta property="og:title" content="Hi">"#;
        assert_eq!(canonical_url(html), None);
    }
}
