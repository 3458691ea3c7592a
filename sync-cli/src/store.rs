//! File-backed storage of sync logs.
//!
//! Each profile's log is stored as `<log_dir>/<profile>.log.xml`.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use synclog_core::{LogConfig, SyncLog};

const LOG_SUFFIX: &str = ".log.xml";

/// Directory of sync log files.
#[derive(Debug, Clone)]
pub struct LogStore {
    dir: PathBuf,
    config: LogConfig,
}

impl LogStore {
    /// Create a store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>, config: LogConfig) -> Self {
        Self {
            dir: dir.into(),
            config,
        }
    }

    /// Directory holding the log files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the log file for a profile.
    pub fn path_for(&self, profile: &str) -> Result<PathBuf> {
        if profile.is_empty()
            || profile.starts_with('.')
            || profile.contains(['/', '\\'])
        {
            anyhow::bail!("Invalid profile name {:?}", profile);
        }
        Ok(self.dir.join(format!("{}{}", profile, LOG_SUFFIX)))
    }

    /// Check if a profile has a log file.
    pub async fn exists(&self, profile: &str) -> Result<bool> {
        let path = self.path_for(profile)?;
        tokio::fs::try_exists(&path)
            .await
            .with_context(|| format!("Failed to check for sync log {}", path.display()))
    }

    /// Load the log of a profile. Fails if it has never been saved.
    pub async fn load(&self, profile: &str) -> Result<SyncLog> {
        let path = self.path_for(profile)?;
        let contents = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("No sync log for profile {:?}", profile))?;
        let mut log = SyncLog::from_xml(&contents, self.config)
            .with_context(|| format!("Invalid sync log {}", path.display()))?;
        // The file name decides which profile the log belongs to
        log.set_profile_name(profile);
        Ok(log)
    }

    /// Load the log of a profile, or start an empty one.
    pub async fn load_or_new(&self, profile: &str) -> Result<SyncLog> {
        if self.exists(profile).await? {
            self.load(profile).await
        } else {
            Ok(SyncLog::with_config(profile, self.config))
        }
    }

    /// Save a log, replacing any previous file.
    ///
    /// Written to a temporary file first and renamed into place.
    pub async fn save(&self, log: &SyncLog) -> Result<()> {
        let path = self.path_for(log.profile_name())?;
        let xml = log.to_xml()?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .context("Failed to create log directory")?;

        let tmp = path.with_extension("xml.tmp");
        tokio::fs::write(&tmp, xml)
            .await
            .context("Failed to write sync log")?;
        tokio::fs::rename(&tmp, &path)
            .await
            .context("Failed to replace sync log")?;

        tracing::info!(
            "Saved sync log of {:?} ({} results) to {}",
            log.profile_name(),
            log.len(),
            path.display()
        );
        Ok(())
    }

    /// Names of all profiles with a log file, sorted.
    pub async fn profiles(&self) -> Result<Vec<String>> {
        let mut profiles = Vec::new();
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(profiles),
            Err(e) => return Err(e).context("Failed to read log directory"),
        };

        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            if let Some(profile) = name.to_str().and_then(|n| n.strip_suffix(LOG_SUFFIX)) {
                if !profile.is_empty() {
                    profiles.push(profile.to_string());
                }
            }
        }

        profiles.sort();
        Ok(profiles)
    }
}
