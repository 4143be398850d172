#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn wallet_cmd(data: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("qrwallet"));
    cmd.env("QRWALLET_DATA", data.path().as_os_str())
        .env_remove("RUST_LOG");
    cmd
}

fn listed_contents(data: &TempDir) -> Vec<String> {
    let output = wallet_cmd(data)
        .args(["list", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let listed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    listed
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["record"]["content"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_empty_wallet_lists_nothing() {
    let data = TempDir::new().unwrap();
    wallet_cmd(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("No codes stored yet."));

    // Startup wrote an empty records file and the marker.
    assert!(data.path().join("qr_codes.json").exists());
    assert!(data.path().join("app_version.json").exists());
}

#[test]
fn test_add_dedup_rename_move_delete_workflow() {
    let data = TempDir::new().unwrap();

    wallet_cmd(&data)
        .args(["add", "https://a.example"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 1: QR Code 1"));

    wallet_cmd(&data)
        .args(["add", "https://b.example"])
        .assert()
        .success()
        .stdout(predicate::str::contains("QR Code 2"));

    wallet_cmd(&data)
        .args(["add", "https://a.example"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Already stored as 1"));
    assert_eq!(
        listed_contents(&data),
        vec!["https://a.example", "https://b.example"]
    );

    wallet_cmd(&data)
        .args(["rename", "2", "Boarding", "pass"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Renamed 2 to Boarding pass"));

    wallet_cmd(&data)
        .args(["move", "2", "1"])
        .assert()
        .success();
    assert_eq!(
        listed_contents(&data),
        vec!["https://b.example", "https://a.example"]
    );

    wallet_cmd(&data)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Boarding pass"));

    wallet_cmd(&data)
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 1: Boarding pass"));
    assert_eq!(listed_contents(&data), vec!["https://a.example"]);
}

#[test]
fn test_add_from_piped_scan() {
    let data = TempDir::new().unwrap();
    wallet_cmd(&data)
        .arg("add")
        .write_stdin("WIFI:S:home;T:WPA;P:secret;;\n")
        .assert()
        .success();
    assert_eq!(listed_contents(&data), vec!["WIFI:S:home;T:WPA;P:secret;;"]);

    wallet_cmd(&data)
        .arg("add")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing scanned"));
    assert_eq!(listed_contents(&data).len(), 1);
}

#[test]
fn test_show_uses_size_flag() {
    let data = TempDir::new().unwrap();
    wallet_cmd(&data).args(["add", "PAYLOAD"]).assert().success();

    wallet_cmd(&data)
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("500x500"))
        .stdout(predicate::str::contains("PAYLOAD"));

    wallet_cmd(&data)
        .args(["show", "1", "--size", "256", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"size\": 256"));
}

#[test]
fn test_bad_index_fails_with_message() {
    let data = TempDir::new().unwrap();
    wallet_cmd(&data).args(["add", "x"]).assert().success();

    wallet_cmd(&data)
        .args(["delete", "7"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Index 7 not found"));

    wallet_cmd(&data)
        .args(["move", "1", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid move"));
}

#[test]
fn test_corrupt_file_is_quarantined_on_startup() {
    let data = TempDir::new().unwrap();
    fs::write(data.path().join("qr_codes.json"), b"\xff\xfe{{{").unwrap();

    wallet_cmd(&data)
        .args(["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Codes:"))
        .stdout(predicate::str::contains("qr_codes_backup_"));

    let backups: Vec<_> = fs::read_dir(data.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_name()
                .to_string_lossy()
                .starts_with("qr_codes_backup_")
        })
        .collect();
    assert_eq!(backups.len(), 1);
    assert_eq!(fs::read(backups[0].path()).unwrap(), b"\xff\xfe{{{");
    assert!(listed_contents(&data).is_empty());
}

#[test]
fn test_data_dir_flag_overrides_env() {
    let env_dir = TempDir::new().unwrap();
    let flag_dir = TempDir::new().unwrap();

    wallet_cmd(&env_dir)
        .args(["add", "elsewhere", "--data-dir"])
        .arg(flag_dir.path())
        .assert()
        .success();

    assert!(flag_dir.path().join("qr_codes.json").exists());
    assert!(listed_contents(&env_dir).is_empty());
}
