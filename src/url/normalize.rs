use crate::{UrlError, UrlResult};
use url::form_urlencoded;
use url::Url;

/// Query key of the platform's plain-rendering flag
pub const PLAIN_RENDERING_KEY: &str = "format";

/// Query value of the platform's plain-rendering flag
pub const PLAIN_RENDERING_VALUE: &str = "light";

/// Fallback token when a seed URL carries no host
const DEFAULT_USERNAME: &str = "blog";

/// Appends the plain-rendering flag (`format=light`) to an entry URL
///
/// The flag is added only when it is absent. It is joined with `&` when the
/// URL already has a query string and with `?` otherwise. A fragment, if any,
/// stays at the end.
///
/// # Examples
///
/// ```
/// use lj_chain::url::with_plain_rendering;
///
/// assert_eq!(
///     with_plain_rendering("http://x/post?id=1"),
///     "http://x/post?id=1&format=light"
/// );
/// assert_eq!(with_plain_rendering("http://x/post"), "http://x/post?format=light");
/// ```
pub fn with_plain_rendering(raw: &str) -> String {
    let (base, fragment) = match raw.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (raw, None),
    };

    if query_value(base, PLAIN_RENDERING_KEY).as_deref() == Some(PLAIN_RENDERING_VALUE) {
        return raw.to_string();
    }

    let separator = if base.ends_with('?') || base.ends_with('&') {
        ""
    } else if base.contains('?') {
        "&"
    } else {
        "?"
    };

    let mut url = format!(
        "{}{}{}={}",
        base, separator, PLAIN_RENDERING_KEY, PLAIN_RENDERING_VALUE
    );
    if let Some(fragment) = fragment {
        url.push('#');
        url.push_str(fragment);
    }
    url
}

/// Returns the first value of a query parameter in a raw URL string
///
/// Works on unparsable URLs too, since only the text after `?` is inspected.
pub fn query_value(raw: &str, key: &str) -> Option<String> {
    let without_fragment = raw.split('#').next().unwrap_or(raw);
    let (_, query) = without_fragment.split_once('?')?;

    form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// Parses a seed URL, accepting only HTTP and HTTPS
pub fn parse_seed_url(raw: &str) -> UrlResult<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    Ok(url)
}

/// Extracts the journal owner's name from an entry URL
///
/// Journals live on per-user subdomains, so the first DNS label of the host is
/// the username (`alice.livejournal.com` -> `alice`).
pub fn username_from_url(url: &Url) -> String {
    url.host_str()
        .and_then(|host| host.split('.').next())
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| DEFAULT_USERNAME.to_string())
}

/// Resolves a link href against the page it was found on
///
/// Returns None for empty, fragment-only, `javascript:` and `mailto:` links,
/// and for anything that does not resolve to HTTP(S).
pub fn resolve_link(href: &str, base_url: &str) -> Option<String> {
    let href = href.trim();

    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("javascript:")
        || href.starts_with("mailto:")
    {
        return None;
    }

    let resolved = match Url::parse(base_url) {
        Ok(base) => base.join(href).ok()?,
        Err(_) => Url::parse(href).ok()?,
    };

    if resolved.scheme() == "http" || resolved.scheme() == "https" {
        Some(resolved.to_string())
    } else {
        None
    }
}
