//! Retention settings for a sync log.

use serde::{Deserialize, Serialize};

/// Number of results a log keeps unless configured otherwise.
pub const MAX_LOG_ENTRIES: usize = 5;

/// How the retained window is ordered after each append.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderingPolicy {
    /// Keep results in the order they were appended.
    #[default]
    AppendOrder,
    /// Re-sort the window by sync time after every append.
    ///
    /// Eviction still drops index 0, which is then the oldest sync time
    /// rather than the oldest append.
    SortedByTime,
}

/// Error type for log configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The log must be able to hold at least the newest result.
    #[error("max_entries must be at least 1")]
    ZeroCapacity,
}

/// Retention settings for a [`SyncLog`](crate::SyncLog).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogConfig {
    max_entries: usize,
    ordering: OrderingPolicy,
}

impl LogConfig {
    /// Create a config, rejecting a zero-sized window.
    pub fn new(max_entries: usize, ordering: OrderingPolicy) -> Result<Self, ConfigError> {
        if max_entries == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(Self {
            max_entries,
            ordering,
        })
    }

    /// Maximum number of retained results.
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Window ordering policy.
    pub fn ordering(&self) -> OrderingPolicy {
        self.ordering
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            max_entries: MAX_LOG_ENTRIES,
            ordering: OrderingPolicy::AppendOrder,
        }
    }
}
