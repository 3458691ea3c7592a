//! Configuration loading for synclog.
//!
//! Configuration is read from an optional TOML file. Every key has a
//! default, so an empty or missing file is valid.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use synclog_core::{LogConfig, OrderingPolicy, MAX_LOG_ENTRIES};

/// Root configuration for synclog.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Retention settings.
    #[serde(default)]
    pub log: LogSection,
    /// Where log files live.
    #[serde(default)]
    pub storage: StorageSection,
}

/// Retention settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LogSection {
    /// Results kept per profile (default: 5).
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    /// Window ordering (default: append order).
    #[serde(default)]
    pub ordering: OrderingPolicy,
}

/// Storage configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageSection {
    /// Directory holding `<profile>.log.xml` files.
    pub log_dir: Option<PathBuf>,
}

fn default_max_entries() -> usize {
    MAX_LOG_ENTRIES
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            ordering: OrderingPolicy::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Validated retention settings.
    pub fn log_config(&self) -> Result<LogConfig, ConfigError> {
        Ok(LogConfig::new(self.log.max_entries, self.log.ordering)?)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Failed to parse configuration file.
    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
    /// Configuration values are out of range.
    #[error("invalid configuration: {0}")]
    Invalid(#[from] synclog_core::ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.log.max_entries, 5);
        assert_eq!(config.log.ordering, OrderingPolicy::AppendOrder);
        assert!(config.storage.log_dir.is_none());
        assert_eq!(config.log_config().unwrap(), LogConfig::default());
    }

    #[test]
    fn full_file_parses() {
        let config: Config = toml::from_str(
            r#"
            [log]
            max_entries = 10
            ordering = "sorted-by-time"

            [storage]
            log_dir = "/var/lib/synclog"
            "#,
        )
        .unwrap();

        let log = config.log_config().unwrap();
        assert_eq!(log.max_entries(), 10);
        assert_eq!(log.ordering(), OrderingPolicy::SortedByTime);
        assert_eq!(config.storage.log_dir, Some(PathBuf::from("/var/lib/synclog")));
    }

    #[test]
    fn zero_entries_is_invalid() {
        let config: Config = toml::from_str("[log]\nmax_entries = 0\n").unwrap();
        assert!(matches!(config.log_config(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn unknown_ordering_fails_to_parse() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("synclog.toml");
        std::fs::write(&path, "[log]\nordering = \"random\"\n").unwrap();

        assert!(matches!(
            Config::from_file(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            Config::from_file(&dir.path().join("nope.toml")),
            Err(ConfigError::ReadError { .. })
        ));
    }
}
