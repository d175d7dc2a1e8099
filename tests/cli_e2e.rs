//! End-to-end CLI tests for tgmark.
//!
//! These tests run the actual binary against a temporary export and check
//! the files it writes and the messages it prints.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

// ============================================================================
// Test Fixtures
// ============================================================================

/// Creates a temporary directory holding a small channel export.
fn setup_fixtures() -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");

    let export = r##"{
  "name": "CLI Channel",
  "type": "public_channel",
  "id": 7,
  "messages": [
    {"id": 1, "type": "message", "date": "2024-01-15T10:30:00", "from": "Me", "from_id": "user7",
     "text": [{"type": "bold", "text": " hi "}, " there ", {"type": "hashtag", "text": "#intro"}],
     "text_entities": [{"type": "bold", "text": " hi "}, {"type": "plain", "text": " there "}, {"type": "hashtag", "text": "#intro"}]},
    {"id": 2, "type": "service", "date": "2024-01-15T10:31:00", "action": "clear_history"},
    {"id": 3, "type": "service", "date": "2024-01-15T10:32:00", "action": "pin_message"},
    {"id": 4, "type": "message", "date": "2024-01-16T09:00:00", "from": "Me", "from_id": "user7",
     "photo": "photos/photo_4.jpg",
     "text": ["hello ", {"type": "mention_name", "text": "Bob", "user_id": 1}]}
  ]
}"##;
    fs::write(dir.path().join("result.json"), export).unwrap();
    fs::write(dir.path().join("broken.json"), "{\"id\": 7, \"messages\": [").unwrap();

    dir
}

fn tgmark() -> Command {
    let mut cmd = Command::cargo_bin("tgmark").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn out_dir(dir: &Path) -> PathBuf {
    dir.join("posts")
}

// ============================================================================
// Basic functionality
// ============================================================================

#[test]
fn test_converts_export() {
    let dir = setup_fixtures();
    let out = out_dir(dir.path());

    tgmark()
        .arg(dir.path().join("result.json"))
        .arg("--out-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Done!"))
        .stdout(predicate::str::contains("Written:  2"));

    let first = fs::read_to_string(out.join("2024-01-15-1.md")).unwrap();
    assert_eq!(
        first,
        "---\ntitle: 1\ndate: 2024-01-15 10:30:00\ntags: #intro\nlayout: post\n---\n\n**hi** there \n"
    );
    assert!(out.join("2024-01-16-4.md").exists());
    assert_eq!(fs::read_dir(&out).unwrap().count(), 2);
}

#[test]
fn test_default_out_dir() {
    let dir = setup_fixtures();

    tgmark()
        .current_dir(dir.path())
        .arg("result.json")
        .assert()
        .success();

    assert!(dir.path().join("formatted_posts").join("2024-01-15-1.md").exists());
}

#[test]
fn test_photo_dir_changes_links_only() {
    let dir = setup_fixtures();
    let out = out_dir(dir.path());

    tgmark()
        .arg(dir.path().join("result.json"))
        .arg("--out-dir")
        .arg(&out)
        .args(["--photo-dir", "attachments"])
        .assert()
        .success();

    let content = fs::read_to_string(out.join("2024-01-16-4.md")).unwrap();
    assert!(content.contains("![image](attachments/photo_4.jpg)\n\n"));
}

// ============================================================================
// Warnings
// ============================================================================

#[test]
fn test_warns_on_unsupported_service_action() {
    let dir = setup_fixtures();

    tgmark()
        .arg(dir.path().join("result.json"))
        .arg("--out-dir")
        .arg(out_dir(dir.path()))
        .assert()
        .success()
        .stderr(predicate::str::contains("pin_message"))
        .stderr(predicate::str::contains("clear_history").not());
}

#[test]
fn test_warns_on_unknown_span() {
    let dir = setup_fixtures();

    tgmark()
        .arg(dir.path().join("result.json"))
        .arg("--out-dir")
        .arg(out_dir(dir.path()))
        .assert()
        .success()
        .stderr(predicate::str::contains("'mention_name' in post #4"));
}

#[test]
fn test_log_level_error_silences_warnings() {
    let dir = setup_fixtures();

    tgmark()
        .arg(dir.path().join("result.json"))
        .arg("--out-dir")
        .arg(out_dir(dir.path()))
        .args(["--log-level", "error"])
        .assert()
        .success()
        .stderr(predicate::str::contains("WARN").not());
}

// ============================================================================
// Error handling
// ============================================================================

#[test]
fn test_missing_input_file() {
    let dir = setup_fixtures();

    tgmark()
        .arg(dir.path().join("nope.json"))
        .arg("--out-dir")
        .arg(out_dir(dir.path()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_invalid_json() {
    let dir = setup_fixtures();

    tgmark()
        .arg(dir.path().join("broken.json"))
        .arg("--out-dir")
        .arg(out_dir(dir.path()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse Telegram export"));
}

#[test]
fn test_no_arguments() {
    tgmark().assert().failure();
}

#[test]
fn test_invalid_log_level() {
    let dir = setup_fixtures();

    tgmark()
        .arg(dir.path().join("result.json"))
        .args(["--log-level", "loud"])
        .assert()
        .failure();
}

#[test]
fn test_version_flag() {
    tgmark()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tgmark"));
}
