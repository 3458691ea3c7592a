//! Bounded sync history for one profile.
//!
//! This module provides the log of recent sync attempts with:
//! - A fixed-size window of the most recent results
//! - The last successful result, kept even after it leaves the window
//! - Conversion to and from the persisted document tree
//!
//! Loading a log replays every persisted result through [`SyncLog::append`],
//! so a reloaded log derives its window and last successful result exactly
//! the way a live one does.

use std::cmp::Ordering;

use synclog_types::{DocumentError, Element, SyncResults, TAG_SYNC_RESULTS};

use crate::config::{LogConfig, OrderingPolicy};

/// Element name of a persisted [`SyncLog`].
pub const TAG_SYNC_LOG: &str = "synclog";
/// Attribute holding the profile name.
pub const ATTR_NAME: &str = "name";

/// Sync history of a single profile.
///
/// Results flow through the log like this:
/// 1. `append()` - evict the oldest entry if the window is full, then add
/// 2. the new result is promoted to last successful if it succeeded and is
///    more recent than the current one
///
/// Cloning produces an independent copy; no result is shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncLog {
    /// Name of the profile this log belongs to.
    profile_name: String,
    /// Retained results, oldest first.
    results: Vec<SyncResults>,
    /// Most recent successful result ever appended.
    last_successful: Option<SyncResults>,
    config: LogConfig,
}

impl SyncLog {
    /// Create an empty log with the default retention settings.
    pub fn new(profile_name: impl Into<String>) -> Self {
        Self::with_config(profile_name, LogConfig::default())
    }

    /// Create an empty log with explicit retention settings.
    pub fn with_config(profile_name: impl Into<String>, config: LogConfig) -> Self {
        Self {
            profile_name: profile_name.into(),
            results: Vec::with_capacity(config.max_entries()),
            last_successful: None,
            config,
        }
    }

    /// Rebuild a log from a `synclog` element.
    ///
    /// A missing `name` attribute yields an empty profile name. Every
    /// `syncresults` child is appended in document order; children that
    /// cannot be read are skipped.
    pub fn from_element(element: &Element, config: LogConfig) -> Self {
        let profile_name = element.attribute(ATTR_NAME).unwrap_or_default();
        let mut log = Self::with_config(profile_name, config);

        for child in element.children_named(TAG_SYNC_RESULTS) {
            match SyncResults::from_element(child) {
                Ok(results) => log.append(results),
                Err(e) => {
                    tracing::warn!(
                        "Skipping unreadable sync results in log of {:?}: {}",
                        log.profile_name,
                        e
                    );
                }
            }
        }

        log
    }

    /// Parse XML text and rebuild the log from its root element.
    pub fn from_xml(xml: &str, config: LogConfig) -> Result<Self, DocumentError> {
        let root = Element::parse(xml)?;
        Ok(Self::from_element(&root, config))
    }

    /// Name of the profile this log belongs to.
    pub fn profile_name(&self) -> &str {
        &self.profile_name
    }

    /// Replace the profile name.
    pub fn set_profile_name(&mut self, profile_name: impl Into<String>) {
        self.profile_name = profile_name.into();
    }

    /// Retention settings of this log.
    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Record the outcome of a sync attempt.
    ///
    /// Drops the oldest retained result first if the window is full.
    pub fn append(&mut self, results: SyncResults) {
        if self.results.len() >= self.config.max_entries() {
            let evicted = self.results.remove(0);
            tracing::debug!(
                "Evicted sync results from {:?} for profile {:?}",
                evicted.sync_time,
                self.profile_name
            );
        }

        self.update_last_successful(&results);
        self.results.push(results);

        if self.config.ordering() == OrderingPolicy::SortedByTime {
            self.results.sort_by(SyncResults::cmp_recency);
        }
    }

    /// The most recently appended result still in the window.
    pub fn most_recent_result(&self) -> Option<&SyncResults> {
        self.results.last()
    }

    /// The most recent successful result, whether or not it is still in
    /// the window.
    pub fn most_recent_successful_result(&self) -> Option<&SyncResults> {
        self.last_successful.as_ref()
    }

    /// All retained results, oldest first.
    pub fn all_results(&self) -> &[SyncResults] {
        &self.results
    }

    /// Number of retained results.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Check if no results are retained.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Convert to a `synclog` element.
    ///
    /// The last successful result is written ahead of the window only when
    /// it is older than everything retained; otherwise it is either already
    /// in the window or superseded there.
    pub fn to_element(&self) -> Element {
        let mut root =
            Element::new(TAG_SYNC_LOG).with_attribute(ATTR_NAME, self.profile_name.as_str());

        if let Some(last) = &self.last_successful {
            let outside_window = match self.results.first() {
                None => true,
                Some(oldest) => last.cmp_recency(oldest) == Ordering::Less,
            };
            if outside_window {
                root.push_child(last.to_element());
            }
        }

        for results in &self.results {
            root.push_child(results.to_element());
        }

        root
    }

    /// Serialize as an XML document.
    pub fn to_xml(&self) -> Result<String, DocumentError> {
        self.to_element().to_xml_string()
    }

    fn update_last_successful(&mut self, results: &SyncResults) {
        if !results.is_successful() {
            return;
        }

        let newer = match &self.last_successful {
            None => true,
            Some(current) => results.cmp_recency(current) == Ordering::Greater,
        };
        if newer {
            tracing::debug!(
                "Last successful sync of {:?} is now {:?}",
                self.profile_name,
                results.sync_time
            );
            self.last_successful = Some(results.clone());
        }
    }
}
