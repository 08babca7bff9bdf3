//! CLI integration tests for the parking binary
//!
//! These drive the real binary against a temporary facility directory and
//! check that state carries over between invocations through the store.

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command instance for the parking binary, isolated in `dir`
fn parking_cmd(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("parking"));
    cmd.current_dir(dir.path()).env_remove("PARKING_DIR");
    cmd
}

/// A facility with one car spot and one motorcycle spot
fn tiny_facility() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("parking.toml"),
        r#"
[[spots]]
category = "Car"
count = 1

[[spots]]
category = "Motorcycle"
count = 1
"#,
    )
    .unwrap();
    dir
}

fn store(dir: &TempDir) -> String {
    fs::read_to_string(dir.path().join("parking_data.txt")).unwrap_or_default()
}

// =============================================================================
// Initialization
// =============================================================================

#[test]
fn test_init_writes_config() {
    let dir = TempDir::new().unwrap();

    parking_cmd(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized parking facility"));

    let config = fs::read_to_string(dir.path().join("parking.toml")).unwrap();
    assert!(config.contains("hourly_rate = 2.5"));
    assert!(config.contains("category = \"Motorcycle\""));
}

#[test]
fn test_init_is_idempotent() {
    let dir = TempDir::new().unwrap();

    parking_cmd(&dir).arg("init").assert().success();
    parking_cmd(&dir).arg("init").assert().success();
}

#[test]
fn test_dir_flag_selects_facility() {
    let dir = TempDir::new().unwrap();
    let other = TempDir::new().unwrap();

    parking_cmd(&dir)
        .args(["--dir", other.path().to_str().unwrap(), "park", "AAA111", "Car"])
        .assert()
        .success();

    assert!(other.path().join("parking_data.txt").is_file());
    assert!(!dir.path().join("parking_data.txt").exists());
}

// =============================================================================
// Park / exit
// =============================================================================

#[test]
fn test_park_writes_store_line() {
    let dir = TempDir::new().unwrap();

    parking_cmd(&dir)
        .args(["park", "AAA111", "Car"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Vehicle parked successfully!"));

    let content = store(&dir);
    assert!(content.starts_with("AAA111,Car,"));
    assert_eq!(content.lines().count(), 1);
}

#[test]
fn test_full_category_refuses_until_exit() {
    let dir = tiny_facility();

    parking_cmd(&dir).args(["park", "AAA111", "Car"]).assert().success();

    parking_cmd(&dir)
        .args(["park", "BBB222", "Car"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No available spots for Car"));

    parking_cmd(&dir)
        .args(["exit", "AAA111"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Parking charges: $"))
        .stdout(predicate::str::contains("Vehicle removed successfully!"));

    parking_cmd(&dir).args(["park", "BBB222", "Car"]).assert().success();
    assert!(store(&dir).starts_with("BBB222,Car,"));
}

#[test]
fn test_exit_unknown_plate_fails_without_change() {
    let dir = TempDir::new().unwrap();

    parking_cmd(&dir)
        .args(["exit", "ZZZ999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Vehicle ZZZ999 not found"));

    assert!(!dir.path().join("parking_data.txt").exists());
}

#[test]
fn test_remove_alias() {
    let dir = TempDir::new().unwrap();

    parking_cmd(&dir).args(["park", "M1", "Motorcycle"]).assert().success();
    parking_cmd(&dir).args(["remove", "M1"]).assert().success();

    assert_eq!(store(&dir), "");
}

#[test]
fn test_exit_charges_from_stored_entry_time() {
    let dir = TempDir::new().unwrap();
    let two_hours_ago = chrono::Utc::now().timestamp() - 7200;
    fs::write(
        dir.path().join("parking_data.txt"),
        format!("OLD1,Car,{}\n", two_hours_ago),
    )
    .unwrap();

    let output = parking_cmd(&dir)
        .args(["exit", "OLD1", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let charge = json["charge"].as_f64().unwrap();
    assert!((5.0..5.1).contains(&charge), "charge was {}", charge);
    assert_eq!(json["released_spot"], 1);
}

// =============================================================================
// Status
// =============================================================================

#[test]
fn test_status_standard_layout() {
    let dir = TempDir::new().unwrap();

    parking_cmd(&dir).args(["park", "ABC123", "Car"]).assert().success();

    parking_cmd(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total spots: 50"))
        .stdout(predicate::str::contains("Occupied car spots: 1/30"))
        .stdout(predicate::str::contains("Occupied motorcycle spots: 0/20"))
        .stdout(predicate::str::contains("License Plate: ABC123 | Type: Car"));
}

#[test]
fn test_status_json() {
    let dir = tiny_facility();

    parking_cmd(&dir).args(["park", "M1", "Motorcycle"]).assert().success();

    let output = parking_cmd(&dir)
        .args(["status", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["total_spots"], 2);
    assert_eq!(json["occupancy"][1]["category"], "Motorcycle");
    assert_eq!(json["occupancy"][1]["occupied"], 1);
    assert_eq!(json["active"][0]["plate"], "M1");
}

#[test]
fn test_status_skips_malformed_store_lines() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("parking_data.txt"),
        "GOOD1,Car,1700000000\nBAD,Car\n",
    )
    .unwrap();

    parking_cmd(&dir)
        .args(["--verbose", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Occupied car spots: 1/30"))
        .stdout(predicate::str::contains("GOOD1"))
        .stdout(predicate::str::contains("BAD").not())
        .stderr(predicate::str::contains("Skipped malformed record on line 2"));
}

#[test]
fn test_status_skips_non_utf8_store_lines() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("parking_data.txt"),
        b"GOOD1,Car,1700000000\nBAD\xff,Car,1\n",
    )
    .unwrap();

    parking_cmd(&dir)
        .args(["--verbose", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Occupied car spots: 1/30"))
        .stdout(predicate::str::contains("GOOD1"))
        .stderr(predicate::str::contains("Skipped malformed record on line 2"));
}

#[test]
fn test_verbose_park_reports_store_update() {
    let dir = TempDir::new().unwrap();

    parking_cmd(&dir)
        .args(["--verbose", "park", "AAA111", "Car"])
        .assert()
        .success()
        .stderr(predicate::str::contains("[verbose:save] Vehicle store updated"))
        .stderr(predicate::str::contains("Warning").not());
}

#[test]
fn test_invalid_config_is_reported() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("parking.toml"), "spots = []\n").unwrap();

    parking_cmd(&dir)
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid facility config"));
}

// =============================================================================
// Interactive session
// =============================================================================

#[test]
fn test_session_is_default_command() {
    let dir = tiny_facility();

    parking_cmd(&dir)
        .write_stdin("1\nAAA111\nCar\n1\nBBB222\nCar\n3\n4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Parking Management System"))
        .stdout(predicate::str::contains("Vehicle parked successfully!"))
        .stdout(predicate::str::contains("No available spots for Car!"))
        .stdout(predicate::str::contains("Occupied car spots: 1/1"));

    assert!(store(&dir).starts_with("AAA111,Car,"));
}

#[test]
fn test_session_survives_restart() {
    let dir = tiny_facility();

    parking_cmd(&dir)
        .arg("session")
        .write_stdin("1\nAAA111\nCar\n4\n")
        .assert()
        .success();

    parking_cmd(&dir)
        .arg("session")
        .write_stdin("2\nAAA111\n2\nAAA111\n4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Vehicle removed successfully!"))
        .stdout(predicate::str::contains("Vehicle not found!"));

    assert_eq!(store(&dir), "");
}

#[test]
fn test_session_accepts_non_utf8_plate() {
    let dir = tiny_facility();

    parking_cmd(&dir)
        .write_stdin(&b"1\nAB\xff\nCar\n4\n"[..])
        .assert()
        .success()
        .stdout(predicate::str::contains("Vehicle parked successfully!"));

    assert!(store(&dir).starts_with("AB\u{FFFD},Car,"));
}

#[test]
fn test_session_ends_on_eof() {
    let dir = TempDir::new().unwrap();

    parking_cmd(&dir)
        .write_stdin("9\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid choice!"));
}
