//! Show when a profile last synced successfully.

use anyhow::Result;

use crate::store::LogStore;

/// Run the last-success command.
pub async fn run(store: &LogStore, profile: &str) -> Result<()> {
    let log = store.load(profile).await?;
    match log.most_recent_successful_result().and_then(|r| r.sync_time) {
        Some(time) => println!("{}", time.to_rfc3339()),
        None => println!("never"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use synclog_core::{LogConfig, SyncLog};
    use tempfile::tempdir;

    #[tokio::test]
    async fn last_success_requires_log() {
        let dir = tempdir().unwrap();
        let store = LogStore::new(dir.path(), LogConfig::default());

        assert!(run(&store, "missing").await.is_err());

        store.save(&SyncLog::new("missing")).await.unwrap();
        assert!(run(&store, "missing").await.is_ok());
    }
}
