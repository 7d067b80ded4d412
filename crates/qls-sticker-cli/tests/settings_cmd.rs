//! Integration tests for the `settings` subcommand.

mod common;

use common::cmd;
use predicates::prelude::*;

#[test]
fn settings_path_prints_override() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");

    cmd()
        .args(["settings", "path", "--settings-file"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("settings.json"));
}

#[test]
fn show_without_saved_settings() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .args(["settings", "show", "--settings-file"])
        .arg(dir.path().join("settings.json"))
        .assert()
        .success()
        .stdout("No saved settings.\n");
}

#[test]
fn show_then_clear_saved_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{"base": "pdfs", "m2": "V769.xlsx"}"#).unwrap();

    cmd()
        .args(["settings", "show", "--settings-file"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"base\": \"pdfs\""))
        .stdout(predicate::str::contains("\"m2\": \"V769.xlsx\""));

    cmd()
        .args(["settings", "clear", "--settings-file"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed"));
    assert!(!path.exists());

    cmd()
        .args(["settings", "clear", "--settings-file"])
        .arg(&path)
        .assert()
        .success()
        .stdout("No saved settings.\n");
}

#[test]
fn apply_save_keeps_saved_base() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{"base": "pdfs"}"#).unwrap();

    // Fails (no master), but the paths are saved first.
    cmd()
        .args(["apply", "--save", "--out"])
        .arg(dir.path().join("out"))
        .arg("--settings-file")
        .arg(&path)
        .assert()
        .failure();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"base\": \"pdfs\""));
    assert!(raw.contains("\"out\""));
}
