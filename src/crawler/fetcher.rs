//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client from the `[http]` configuration
//! - Adding the plain-rendering flag to entry URLs
//! - Annotating each page with its template variant
//! - Resolving redirector pages to the canonical entry URL
//!
//! There are no retries: one failed request ends the crawl.

use crate::config::HttpConfig;
use crate::extract::{canonical_url, TemplateVariant};
use crate::url::with_plain_rendering;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

/// Errors raised while fetching a page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    BadStatus { url: String, status: u16 },

    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Redirector {url} does not point at a canonical entry URL")]
    UnresolvedRedirect { url: String },
}

impl FetchError {
    /// The URL whose request failed
    pub fn url(&self) -> &str {
        match self {
            Self::BadStatus { url, .. }
            | Self::Http { url, .. }
            | Self::UnresolvedRedirect { url } => url,
        }
    }
}

/// A fetched entry page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// The URL actually requested (with the plain-rendering flag)
    pub url: String,

    /// Layout detected from the requested URL
    pub variant: TemplateVariant,

    /// Raw response body
    pub body: String,
}

/// Builds an HTTP client with proper configuration
///
/// Redirects are followed (the platform's navigation links redirect). No
/// timeout is set unless `timeout_secs` is configured.
///
/// # Example
///
/// ```no_run
/// use lj_chain::config::HttpConfig;
/// use lj_chain::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(config.user_agent.as_str())
        .gzip(true)
        .brotli(true);

    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build()
}

/// Fetches entry pages and redirector pages
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Creates a fetcher around an existing client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates a fetcher with a client built from configuration
    pub fn from_config(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config)?))
    }

    /// Fetches an entry page
    ///
    /// # Request Flow
    ///
    /// 1. Append `format=light` unless already present
    /// 2. Detect the template variant from the resulting URL
    /// 3. Send a single GET; anything but HTTP 200 is `BadStatus`
    ///
    /// # Arguments
    ///
    /// * `url` - The entry URL, with or without the plain-rendering flag
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let url = with_plain_rendering(url);
        let variant = TemplateVariant::detect(&url);

        tracing::info!("Fetching {} ({} template)", url, variant);
        let body = self.get(&url).await?;

        Ok(FetchedPage { url, variant, body })
    }

    /// Follows a redirector link and returns the canonical URL of its target
    ///
    /// The redirector is requested as-is; the landing page's `og:url` meta tag
    /// names the entry.
    pub async fn resolve_redirect(&self, url: &str) -> Result<String, FetchError> {
        tracing::debug!("Resolving redirector {}", url);
        let body = self.get(url).await?;

        canonical_url(&body).ok_or_else(|| FetchError::UnresolvedRedirect {
            url: url.to_string(),
        })
    }

    async fn get(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::BadStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&HttpConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_build_http_client_with_timeout() {
        let config = HttpConfig {
            user_agent: "TestBot/1.0".to_string(),
            timeout_secs: Some(5),
        };
        assert!(build_http_client(&config).is_ok());
    }

    #[test]
    fn test_fetch_error_url() {
        let error = FetchError::BadStatus {
            url: "https://alice.livejournal.com/1.html".to_string(),
            status: 404,
        };
        assert_eq!(error.url(), "https://alice.livejournal.com/1.html");
        assert_eq!(
            error.to_string(),
            "HTTP 404 for https://alice.livejournal.com/1.html"
        );
    }

    // Request behaviour is covered with wiremock in tests/crawl_tests.rs
}
