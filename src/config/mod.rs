//! Configuration module for lj-chain
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Command-line flags override values loaded here.
//!
//! # Example
//!
//! ```no_run
//! use lj_chain::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("lj-chain.toml")).unwrap();
//! println!("Crawler will stop after {} entries", config.crawl.max_entries);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlConfig, HttpConfig, OutputConfig, OutputFormat, DEFAULT_DESTINATION,
    DEFAULT_MAX_ENTRIES,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
