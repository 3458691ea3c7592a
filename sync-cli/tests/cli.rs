//! End-to-end tests for the synclog binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn synclog(log_dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("synclog").unwrap();
    cmd.arg("--log-dir").arg(log_dir);
    cmd
}

fn record(log_dir: &std::path::Path, profile: &str, major: &str, time: &str) {
    synclog(log_dir)
        .args(["record", profile, "--major", major, "--time", time])
        .assert()
        .success();
}

#[test]
fn record_then_show() {
    let dir = tempdir().unwrap();
    record(dir.path(), "calendar", "success", "2024-05-01T10:00:00Z");
    record(dir.path(), "calendar", "failed", "2024-05-02T10:00:00Z");

    assert!(dir.path().join("calendar.log.xml").exists());

    synclog(dir.path())
        .args(["show", "calendar"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== sync log: calendar ==="))
        .stdout(predicate::str::contains("2024-05-02 10:00:00 UTC  failed"))
        .stdout(predicate::str::contains(
            "Last successful: 2024-05-01 10:00:00 UTC  success",
        ));
}

#[test]
fn last_success_outlives_the_window() {
    let dir = tempdir().unwrap();
    record(dir.path(), "email", "success", "2024-05-01T00:00:00Z");
    for day in 2..=8 {
        record(
            dir.path(),
            "email",
            "cancelled",
            &format!("2024-05-0{}T00:00:00Z", day),
        );
    }

    synclog(dir.path())
        .args(["last-success", "email"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("2024-05-01T00:00:00"));

    let output = synclog(dir.path())
        .args(["show", "email", "--json"])
        .output()
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["results"].as_array().unwrap().len(), 5);
    assert_eq!(value["last_successful"]["major_code"], "success");
}

#[test]
fn last_success_of_unknown_profile_fails() {
    let dir = tempdir().unwrap();
    synclog(dir.path())
        .args(["last-success", "nobody"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No sync log"));
}

#[test]
fn list_shows_recorded_profiles() {
    let dir = tempdir().unwrap();
    synclog(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No sync logs"));

    record(dir.path(), "notes", "success", "2024-05-01T00:00:00Z");
    record(dir.path(), "contacts", "failed", "2024-05-01T00:00:00Z");

    synclog(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout("contacts\nnotes\n");
}

#[test]
fn config_file_sets_window_size() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("synclog.toml");
    std::fs::write(&config, "[log]\nmax_entries = 2\n").unwrap();

    for day in 1..=4 {
        synclog(dir.path())
            .arg("--config")
            .arg(&config)
            .args([
                "record",
                "p",
                "--major",
                "failed",
                "--time",
                &format!("2024-05-0{}T00:00:00Z", day),
            ])
            .assert()
            .success();
    }

    let output = synclog(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["show", "p", "--json"])
        .output()
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["results"].as_array().unwrap().len(), 2);
    assert!(value["last_successful"].is_null());
}

#[test]
fn invalid_time_is_rejected() {
    let dir = tempdir().unwrap();
    synclog(dir.path())
        .args(["record", "p", "--major", "success", "--time", "yesterday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid RFC 3339 time"));
}
