use crate::config::types::Config;
use crate::config::validation::validate;
use crate::{ConfigError, ConfigResult};
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads, parses and validates a configuration file
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use lj_chain::config::load_config;
///
/// let config = load_config(Path::new("lj-chain.toml")).unwrap();
/// println!("Max entries: {}", config.crawl.max_entries);
/// ```
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Loads a configuration and the SHA-256 of the file it came from
///
/// The hash is logged at startup so an export can be matched with the
/// configuration that produced it.
pub fn load_config_with_hash(path: &Path) -> ConfigResult<(Config, String)> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    Ok((config, hash_content(&content)))
}

/// Computes the hex-encoded SHA-256 of a configuration file
pub fn compute_config_hash(path: &Path) -> ConfigResult<String> {
    let content = std::fs::read_to_string(path)?;
    Ok(hash_content(&content))
}

fn parse_config(content: &str) -> ConfigResult<Config> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_full_config() {
        let file = create_temp_config(
            r#"
[crawl]
max-entries = 25

[http]
user-agent = "TestBot/1.0"
timeout-secs = 10

[output]
destination = "/tmp/blogs"
format = "jekyll"
overwrite = true
"#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.crawl.max_entries, 25);
        assert_eq!(config.http.user_agent, "TestBot/1.0");
        assert_eq!(config.http.timeout_secs, Some(10));
        assert_eq!(config.output.destination, "/tmp/blogs");
        assert_eq!(config.output.format, OutputFormat::Jekyll);
        assert!(config.output.overwrite);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let file = create_temp_config("");
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawl.max_entries, 500);
        assert_eq!(config.http.timeout_secs, None);
        assert_eq!(config.output.destination, "./blogs");
        assert_eq!(config.output.format, OutputFormat::Csv);
        assert!(!config.output.overwrite);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let file = create_temp_config("[output]\nformat = \"csv\"\n");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.output.destination, "./blogs");
    }

    #[test]
    fn test_unknown_format_rejected() {
        let file = create_temp_config("[output]\nformat = \"xml\"\n");
        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_validation_error() {
        let file = create_temp_config("[crawl]\nmax-entries = 0\n");
        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = load_config(Path::new("/nonexistent/lj-chain.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_hash_matches_between_loaders() {
        let file = create_temp_config("[crawl]\nmax-entries = 3\n");
        let (_, hash) = load_config_with_hash(file.path()).unwrap();
        assert_eq!(hash, compute_config_hash(file.path()).unwrap());
        assert_eq!(hash.len(), 64);
    }

    #[test]
    fn test_different_content_different_hash() {
        let file1 = create_temp_config("[crawl]\nmax-entries = 1\n");
        let file2 = create_temp_config("[crawl]\nmax-entries = 2\n");
        assert_ne!(
            compute_config_hash(file1.path()).unwrap(),
            compute_config_hash(file2.path()).unwrap()
        );
    }
}
