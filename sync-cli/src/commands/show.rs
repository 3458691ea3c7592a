//! Show the sync history of a profile.

use anyhow::Result;
use serde::Serialize;
use synclog_core::{SyncLog, SyncResults};

use crate::store::LogStore;

/// JSON view of a log.
#[derive(Debug, Serialize)]
struct LogView<'a> {
    profile: &'a str,
    results: &'a [SyncResults],
    last_successful: Option<&'a SyncResults>,
}

/// Run the show command.
pub async fn run(store: &LogStore, profile: &str, json: bool) -> Result<()> {
    let log = store.load(profile).await?;
    if json {
        println!("{}", render_json(&log)?);
    } else {
        print!("{}", render_text(&log));
    }
    Ok(())
}

/// Render a log as pretty-printed JSON.
pub fn render_json(log: &SyncLog) -> Result<String> {
    let view = LogView {
        profile: log.profile_name(),
        results: log.all_results(),
        last_successful: log.most_recent_successful_result(),
    };
    Ok(serde_json::to_string_pretty(&view)?)
}

/// Render a log for the terminal, oldest result first.
pub fn render_text(log: &SyncLog) -> String {
    let mut out = format!("=== sync log: {} ===\n", log.profile_name());

    if log.is_empty() {
        out.push_str("  (no results)\n");
    }
    for results in log.all_results() {
        out.push_str(&format!("  {}\n", format_results(results)));
    }

    out.push('\n');
    match log.most_recent_successful_result() {
        Some(last) => out.push_str(&format!("Last successful: {}\n", format_results(last))),
        None => out.push_str("Last successful: never\n"),
    }
    out
}

/// One-line summary of a result.
pub fn format_results(results: &SyncResults) -> String {
    let time = results
        .sync_time
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "(no time)".to_string());
    let mut line = format!("{}  {:<9}  {}", time, results.major_code, results.minor_code);
    if results.scheduled {
        line.push_str("  [scheduled]");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use synclog_core::{MajorCode, MinorCode};

    fn sample() -> SyncLog {
        let mut log = SyncLog::new("contacts");
        log.append(SyncResults::new(
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()),
            MajorCode::Success,
            MinorCode::NO_ERROR,
        ));
        log.append(
            SyncResults::new(
                Some(Utc.with_ymd_and_hms(2024, 3, 2, 8, 30, 0).unwrap()),
                MajorCode::Failed,
                MinorCode::CONNECTION_ERROR,
            )
            .with_scheduled(true),
        );
        log
    }

    #[test]
    fn text_lists_results_and_last_success() {
        let text = render_text(&sample());

        assert!(text.starts_with("=== sync log: contacts ==="));
        assert!(text.contains("2024-03-02 08:30:00 UTC  failed     connection error (502)  [scheduled]"));
        assert!(text.contains("Last successful: 2024-03-01 12:00:00 UTC  success"));
    }

    #[test]
    fn text_for_empty_log() {
        let text = render_text(&SyncLog::new("p"));
        assert!(text.contains("(no results)"));
        assert!(text.contains("Last successful: never"));
    }

    #[test]
    fn json_has_window_and_last_success() {
        let json = render_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["profile"], "contacts");
        assert_eq!(value["results"].as_array().unwrap().len(), 2);
        assert_eq!(value["results"][1]["major_code"], "failed");
        assert_eq!(value["results"][1]["minor_code"], 502);
        assert_eq!(value["last_successful"]["major_code"], "success");
    }
}
