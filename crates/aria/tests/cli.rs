// SPDX-FileCopyrightText: 2026 Aria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Runs the `aria` binary against a temporary database.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use aria_config::StorageConfig;
use aria_core::{TimeSlot, Weekday};
use aria_storage::{NewDeviation, SqliteStore};
use aria_test_utils::fixtures;
use chrono::{Duration, TimeZone, Utc};
use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
    config_path: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("data").join("aria.db");
        let config_path = dir.path().join("aria.toml");
        std::fs::write(
            &config_path,
            format!(
                "[log]\nlevel = \"warn\"\n\n[storage]\ndatabase_path = \"{}\"\n\n[cache]\nkey_prefix = \"cli\"\n",
                db_path.display()
            ),
        )
        .unwrap();
        Self { dir, config_path }
    }

    fn db_path(&self) -> PathBuf {
        self.dir.path().join("data").join("aria.db")
    }

    fn run(&self, args: &[&str]) -> Output {
        run_with_config(&self.config_path, args)
    }
}

fn run_with_config(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_aria"))
        .args(args)
        .arg("--config")
        .arg(config)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Seed the standard week plus a Wednesday closure on 2026-12-23.
async fn seed(db_path: &Path) -> i64 {
    let store = SqliteStore::open(&StorageConfig {
        database_path: db_path.to_str().unwrap().to_string(),
        wal_mode: true,
    })
    .await
    .unwrap();
    let schedule = store.create_schedule("Main street").await.unwrap();
    for slot in fixtures::standard_week() {
        store.upsert_time_slot(schedule.id, &slot).await.unwrap();
    }
    let from = Utc.with_ymd_and_hms(2026, 12, 23, 0, 0, 0).unwrap();
    let deviation = store
        .create_deviation(&NewDeviation {
            schedule_id: schedule.id,
            template_id: None,
            active_from: from,
            active_until: from + Duration::days(1),
        })
        .await
        .unwrap();
    store
        .upsert_deviation_slot(deviation.id, &TimeSlot::closed(Weekday::Wednesday))
        .await
        .unwrap();
    store.close().await.unwrap();
    schedule.id.0
}

#[test]
fn config_prints_effective_toml() {
    let ws = Workspace::new();
    let output = ws.run(&["config"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let text = stdout(&output);
    assert!(text.contains("[cache]"));
    assert!(text.contains("key_prefix = \"cli\""));
    assert!(text.contains("grouping = \"first_seen\""));
}

#[test]
fn migrate_creates_database() {
    let ws = Workspace::new();
    let output = ws.run(&["migrate"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(ws.db_path().exists());
    assert!(stdout(&output).contains("database ready"));
}

#[tokio::test]
async fn resolve_prints_json_response() {
    let ws = Workspace::new();
    let id = seed(&ws.db_path()).await;

    let output = ws.run(&[
        "resolve",
        &id.to_string(),
        "--at",
        "2026-12-23T12:00:00Z",
        "--json",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["id"], id);
    let days: Vec<&str> = json["humanReadableTimeSlots"]
        .as_array()
        .unwrap()
        .iter()
        .map(|run| run["days"].as_str().unwrap())
        .collect();
    assert_eq!(
        days,
        vec!["Monday - Thursday", "Wednesday - Sunday", "Friday", "Saturday"]
    );
}

#[tokio::test]
async fn resolve_prints_plain_table() {
    let ws = Workspace::new();
    let id = seed(&ws.db_path()).await;

    let output = ws.run(&["resolve", &id.to_string(), "--at", "2026-12-30T12:00:00Z", "--plain"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let text = stdout(&output);
    assert!(text.contains("Main street"));
    assert!(text.contains("Monday - Thursday  09:00 - 17:00"));
    assert!(!text.contains("deviation"));
}

#[test]
fn unknown_schedule_exits_with_error() {
    let ws = Workspace::new();
    let output = ws.run(&["resolve", "999", "--json"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("error: schedule not found: 999"));
}

#[test]
fn invalid_config_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("bad.toml");
    std::fs::write(&config, "[cache]\nttl_sec = 5\n").unwrap();

    let output = run_with_config(&config, &["config"]);
    assert_eq!(output.status.code(), Some(1));
}
