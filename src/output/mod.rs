//! Output module for persisting extracted entries
//!
//! This module handles:
//! - The sink interface the crawler hands entries to
//! - CSV export (one row per entry)
//! - Jekyll export (one post file per entry)

mod csv_sink;
mod jekyll;
mod traits;

pub use csv_sink::{CsvSink, CSV_HEADER, TAG_DELIMITER};
pub use jekyll::{format_post, post_filename, slugify, JekyllSink};
pub use traits::{EntrySink, SinkError, SinkResult};

use crate::config::{OutputConfig, OutputFormat};
use std::path::Path;

/// Opens the sink selected by the output configuration
///
/// The destination directory is created if it does not exist.
///
/// # Arguments
///
/// * `config` - Output configuration (destination, format, overwrite)
/// * `username` - Journal owner, used to name the CSV export
///
/// # Returns
///
/// * `Ok(Box<dyn EntrySink>)` - Ready to accept entries
/// * `Err(SinkError)` - The directory or file could not be created
pub fn open_sink(config: &OutputConfig, username: &str) -> SinkResult<Box<dyn EntrySink>> {
    let destination = Path::new(&config.destination);
    std::fs::create_dir_all(destination)?;

    match config.format {
        OutputFormat::Csv => {
            let sink = CsvSink::create(&CsvSink::path_for(destination, username))?;
            tracing::info!("Writing CSV export to {}", sink.path().display());
            Ok(Box::new(sink))
        }
        OutputFormat::Jekyll => {
            tracing::info!("Writing Jekyll posts to {}", destination.display());
            let today = chrono::Local::now().date_naive();
            Ok(Box::new(JekyllSink::new(
                destination,
                config.overwrite,
                today,
            )))
        }
    }
}
