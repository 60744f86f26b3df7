//! Integration tests for the `billtrack` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const TODAY: &str = "2025-01-15";

fn billtrack(temp_dir: &TempDir, owner: &str) -> Command {
    let mut cmd = Command::cargo_bin("billtrack").unwrap();
    cmd.env_remove("BILLTRACK_DB")
        .env_remove("BILLTRACK_OWNER")
        .env_remove("BILLTRACK_LOG_DIR")
        .arg("--db")
        .arg(temp_dir.path().join("trackers.sqlite3"))
        .arg("--owner")
        .arg(owner)
        .arg("--today")
        .arg(TODAY);
    cmd
}

fn add(temp_dir: &TempDir, owner: &str, args: &[&str]) -> String {
    let output = billtrack(temp_dir, owner)
        .arg("add")
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    stdout
        .lines()
        .next()
        .and_then(|line| line.strip_prefix("added "))
        .unwrap()
        .to_string()
}

fn seed(temp_dir: &TempDir) {
    add(
        temp_dir,
        "alice",
        &["Netflix", "15.99", "--category", "Entertainment", "--due", "2025-01-17"],
    );
    add(
        temp_dir,
        "alice",
        &["Spotify", "9.99", "--category", "Entertainment", "--due", "2025-01-20"],
    );
    add(
        temp_dir,
        "alice",
        &[
            "Amazon Prime",
            "139.00",
            "--category",
            "Shopping",
            "--cadence",
            "yearly",
            "--due",
            "2025-03-15",
        ],
    );
}

#[test]
fn test_version_needs_no_owner() {
    let mut cmd = Command::cargo_bin("billtrack").unwrap();
    cmd.env_remove("BILLTRACK_OWNER")
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("billtrack_core"));
}

#[test]
fn test_missing_owner_fails() {
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("billtrack").unwrap();
    cmd.env_remove("BILLTRACK_OWNER")
        .arg("--db")
        .arg(temp_dir.path().join("trackers.sqlite3"))
        .arg("dashboard")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--owner"));
}

#[test]
fn test_presets_need_no_owner() {
    let mut cmd = Command::cargo_bin("billtrack").unwrap();
    cmd.env_remove("BILLTRACK_OWNER")
        .arg("presets")
        .assert()
        .success()
        .stdout(predicate::str::contains("Insurance"))
        .stdout(predicate::str::contains("Shield"))
        .stdout(predicate::str::contains("Adobe Creative Cloud"));
}

#[test]
fn test_add_fills_look_from_category_and_template() {
    let temp_dir = TempDir::new().unwrap();

    billtrack(&temp_dir, "alice")
        .args([
            "add",
            "Car Insurance",
            "156.00",
            "--category",
            "Insurance",
            "--due",
            "2025-01-30",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("icon: Shield  color: bg-blue-500"));

    billtrack(&temp_dir, "alice")
        .args(["add", "--template", "netflix", "--due", "2025-01-20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Netflix"))
        .stdout(predicate::str::contains("15.99"))
        .stdout(predicate::str::contains("icon: Tv  color: bg-red-500"));

    billtrack(&temp_dir, "alice")
        .args(["add", "--template", "Hulu", "--due", "2025-01-20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown template"));

    billtrack(&temp_dir, "alice")
        .args(["add", "--category", "Software", "--due", "2025-01-20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NAME is required"));
}

#[test]
fn test_dashboard_reports_spend_and_due_count() {
    let temp_dir = TempDir::new().unwrap();
    seed(&temp_dir);

    billtrack(&temp_dir, "alice")
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total trackers: 3"))
        .stdout(predicate::str::contains("Due within 7 days: 2"))
        .stdout(predicate::str::contains("Monthly spend: $25.98"))
        .stdout(predicate::str::contains("Yearly projection: $311.76"));
}

#[test]
fn test_add_rejects_malformed_input() {
    let temp_dir = TempDir::new().unwrap();

    billtrack(&temp_dir, "alice")
        .args(["add", "Rent", "1200", "--category", "Housing", "--due", "2025-13-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid due date"));

    billtrack(&temp_dir, "alice")
        .args(["add", "Rent", "twelve", "--category", "Housing", "--due", "2025-02-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid amount"));

    billtrack(&temp_dir, "alice")
        .args([
            "add", "Rent", "1200", "--category", "Housing", "--due", "2025-02-01", "--color",
            "red",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid color token"));
}

#[test]
fn test_list_filters_and_sorts() {
    let temp_dir = TempDir::new().unwrap();
    seed(&temp_dir);

    let output = billtrack(&temp_dir, "alice")
        .args(["list", "--sort", "amount"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    let amazon = stdout.find("Amazon Prime").unwrap();
    let netflix = stdout.find("Netflix").unwrap();
    let spotify = stdout.find("Spotify").unwrap();
    assert!(amazon < netflix && netflix < spotify, "unexpected order:\n{stdout}");
    assert!(stdout.contains("Categories: Entertainment, Shopping"));
    assert!(stdout.contains("Due this week: 2"), "{stdout}");
    assert!(stdout.contains("(Due in 2 days) [soon]"), "{stdout}");
    assert!(stdout.contains("(Due in 5 days) [later]"), "{stdout}");

    billtrack(&temp_dir, "alice")
        .args(["list", "--search", "FLIX"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Netflix"))
        .stdout(predicate::str::contains("Spotify").not())
        .stdout(predicate::str::contains("Monthly spend: $15.99"))
        .stdout(predicate::str::contains("Due this week: 1"));
}

#[test]
fn test_update_and_delete_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let id = add(
        &temp_dir,
        "alice",
        &["Gym", "30.00", "--category", "Health", "--due", "2025-01-18"],
    );

    billtrack(&temp_dir, "alice")
        .args(["update", &id, "--amount", "35.50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("35.50"))
        .stdout(predicate::str::contains("Due in 3 days"));

    billtrack(&temp_dir, "bob")
        .args(["delete", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tracker not found"));

    billtrack(&temp_dir, "alice")
        .args(["delete", &id])
        .assert()
        .success();

    billtrack(&temp_dir, "alice")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 tracker(s)"));
}

#[test]
fn test_update_without_fields_fails() {
    let temp_dir = TempDir::new().unwrap();
    let id = add(
        &temp_dir,
        "alice",
        &["Gym", "30.00", "--category", "Health", "--due", "2025-01-18"],
    );

    billtrack(&temp_dir, "alice")
        .args(["update", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to update"));
}

#[test]
fn test_reminders_follow_settings() {
    let temp_dir = TempDir::new().unwrap();
    add(
        &temp_dir,
        "alice",
        &["Water", "40.00", "--category", "Utilities", "--due", "2025-01-16"],
    );

    billtrack(&temp_dir, "alice")
        .arg("reminders")
        .assert()
        .success()
        .stdout(predicate::str::contains("Due soon (1):"))
        .stdout(predicate::str::contains("Reminders today: 1"));

    billtrack(&temp_dir, "alice")
        .args(["settings", "set", "--email", "false", "--browser", "false"])
        .assert()
        .success()
        .stdout(predicate::str::contains("email: false"))
        .stdout(predicate::str::contains("sms: false"));

    billtrack(&temp_dir, "alice")
        .arg("reminders")
        .assert()
        .success()
        .stdout(predicate::str::contains("Reminders today: 0"));

    billtrack(&temp_dir, "alice")
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("remind_1_day: true"))
        .stdout(predicate::str::contains("browser: false"));
}
