//! lj-chain: walks a LiveJournal entry chain backwards
//!
//! Starting from a known entry URL, the crawler fetches each page, extracts the
//! title, body, tags and publication time, and follows the "previous entry"
//! link until the chain ends or the entry limit is reached. Extracted entries
//! are handed one at a time to an output sink (CSV table or Jekyll posts).

pub mod config;
pub mod crawler;
pub mod entry;
pub mod extract;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for lj-chain operations
#[derive(Debug, Error)]
pub enum LjError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),
}

/// Result type alias for lj-chain operations
pub type Result<T> = std::result::Result<T, LjError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlReport, Crawler, StopReason};
pub use entry::Entry;
pub use extract::{extract, TemplateVariant};
pub use output::EntrySink;
