//! Record the outcome of a sync attempt.

use anyhow::Result;
use chrono::{DateTime, Utc};
use synclog_core::{MajorCode, MinorCode, SyncResults};

use crate::commands::show::format_results;
use crate::store::LogStore;

/// Outcome to record.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// Overall outcome.
    pub major: MajorCode,
    /// Detailed reason.
    pub minor: MinorCode,
    /// When the sync finished.
    pub time: DateTime<Utc>,
    /// Whether the scheduler started the sync.
    pub scheduled: bool,
}

/// Run the record command.
pub async fn run(store: &LogStore, profile: &str, outcome: Outcome) -> Result<()> {
    let mut log = store.load_or_new(profile).await?;

    let results = SyncResults::new(Some(outcome.time), outcome.major, outcome.minor)
        .with_scheduled(outcome.scheduled);
    println!("Recorded: {}", format_results(&results));

    log.append(results);
    store.save(&log).await?;

    if let Some(last) = log.most_recent_successful_result() {
        println!("Last successful: {}", format_time(last));
    }

    Ok(())
}

fn format_time(results: &SyncResults) -> String {
    results
        .sync_time
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| "unknown".to_string())
}
