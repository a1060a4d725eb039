//! CLI visit integration tests
//!
//! Drive the compiled `kaiz` binary against a scratch database and check
//! both its output and what ended up in SQLite.

use rusqlite::Connection;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn kaiz(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_kaiz"));
    cmd.current_dir(dir)
        .env_remove("KAIZ_DATABASE_PATH")
        .env_remove("KAIZ_LOGGING_PROFILE")
        .env_remove("KAIZ_LOGGING_ENABLED")
        .env_remove("RUST_LOG");
    cmd
}

fn run(dir: &Path, db: &Path, args: &[&str]) -> Output {
    kaiz(dir)
        .arg("--db")
        .arg(db)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute CLI")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn setup() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("visits.db");
    (temp_dir, db_path)
}

fn add_basic(dir: &Path, db: &Path, date: &str, company: &str) -> Output {
    let output = run(dir, db, &["add", "-d", date, "-c", company]);
    assert!(
        output.status.success(),
        "add should succeed. Stderr: {}",
        stderr(&output)
    );
    output
}

#[test]
fn test_cli_add_prints_serial_and_summary() {
    // Given: an empty store
    let (temp_dir, db_path) = setup();

    // When: a visit is added with every summary field
    let output = run(
        temp_dir.path(),
        &db_path,
        &[
            "add",
            "--visit-date",
            "2024-01-05",
            "--company-name",
            "Acme Tools",
            "-n",
            "R. Sharma",
            "--tpe-status",
            "tpe",
            "--opportunity",
            "yes",
        ],
    );

    // Then: the banner goes to stderr and the summary to stdout
    assert!(output.status.success(), "Stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("Sales Engineer's CLI tool"));
    let out = stdout(&output);
    assert!(out.contains("Visit record added successfully with Serial No: 1"));
    assert!(out.contains("Visit Date: 2024-01-05"));
    assert!(out.contains("Company: Acme Tools"));
    assert!(out.contains("Customer: R. Sharma"));
    assert!(out.contains("Customer Type: TPE"));

    // And: the row is stored with canonical values
    let conn = Connection::open(&db_path).unwrap();
    let (category, opportunity, tpe_count): (String, String, i64) = conn
        .query_row(
            "SELECT tpe_or_non_tpe, opportunity_for_new, tpe_machines_nos FROM visits WHERE sr_no = 1",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .unwrap();
    assert_eq!(category, "TPE");
    assert_eq!(opportunity, "YES");
    assert_eq!(tpe_count, 0);
}

#[test]
fn test_cli_add_prompts_for_missing_required_values() {
    let (temp_dir, db_path) = setup();

    let mut child = kaiz(temp_dir.path())
        .arg("--db")
        .arg(&db_path)
        .args(["add", "--location", "Pune"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn CLI");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"05-01-2024\n2024-01-05\nPrompted Co\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success(), "Stderr: {}", stderr(&output));
    let err = stderr(&output);
    assert!(err.contains("Visit date(YYYY-MM-DD): "));
    assert!(err.contains("Date must be in YYYY-MM-DD format"));
    assert!(err.contains("Company name: "));
    assert!(stdout(&output).contains("Company: Prompted Co"));
}

#[test]
fn test_cli_add_without_input_fails_and_stores_nothing() {
    let (temp_dir, db_path) = setup();

    let output = run(temp_dir.path(), &db_path, &["add", "-c", "No Date Co"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Error:"));
    let conn = Connection::open(&db_path).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM visits", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn test_cli_rejects_bad_choice_values() {
    let (temp_dir, db_path) = setup();

    let output = run(
        temp_dir.path(),
        &db_path,
        &["add", "-d", "2024-01-05", "-c", "Acme", "--load", "maybe"],
    );

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Must be either YES or NO"));
}

#[test]
fn test_cli_update_show_round_trip() {
    let (temp_dir, db_path) = setup();
    add_basic(temp_dir.path(), &db_path, "2024-01-05", "Acme Tools");

    let updated = run(
        temp_dir.path(),
        &db_path,
        &["update", "1", "--remarks", "Quote sent", "--tpe-machines", "4"],
    );
    assert!(updated.status.success(), "Stderr: {}", stderr(&updated));
    assert!(stdout(&updated).contains("Visit record 1 updated"));

    let shown = run(temp_dir.path(), &db_path, &["show", "1"]);
    assert!(shown.status.success(), "Stderr: {}", stderr(&shown));
    let out = stdout(&shown);
    assert!(out.contains("Company: Acme Tools"));
    assert!(out.contains("Remarks: Quote sent"));
    assert!(out.contains("TPE Machines: 4"));
}

#[test]
fn test_cli_update_missing_and_empty() {
    let (temp_dir, db_path) = setup();
    add_basic(temp_dir.path(), &db_path, "2024-01-05", "Acme Tools");

    let missing = run(temp_dir.path(), &db_path, &["update", "99", "--remarks", "x"]);
    assert!(!missing.status.success());
    assert!(stderr(&missing).contains("No visit record found with Serial No: 99"));

    let empty = run(temp_dir.path(), &db_path, &["update", "1"]);
    assert!(empty.status.success());
    assert!(stdout(&empty).contains("Nothing to update for Serial No: 1"));
}

#[test]
fn test_cli_show_missing_visit_fails() {
    let (temp_dir, db_path) = setup();

    let output = run(temp_dir.path(), &db_path, &["show", "5"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("No visit record found with Serial No: 5"));
}

#[test]
fn test_cli_list_all_and_by_month() {
    let (temp_dir, db_path) = setup();
    add_basic(temp_dir.path(), &db_path, "2024-01-05", "January Co");
    add_basic(temp_dir.path(), &db_path, "2024-02-10", "February Co");

    let all = run(temp_dir.path(), &db_path, &["list"]);
    assert!(all.status.success(), "Stderr: {}", stderr(&all));
    let out = stdout(&all);
    let feb = out.find("February Co").expect("February listed");
    let jan = out.find("January Co").expect("January listed");
    assert!(feb < jan, "newest visit should be listed first");
    assert!(out.contains("Showing 2 of 2 visit record(s)"));

    let january = run(temp_dir.path(), &db_path, &["list", "--year", "2024", "--month", "1"]);
    assert!(january.status.success());
    let out = stdout(&january);
    assert!(out.contains("January Co"));
    assert!(!out.contains("February Co"));
    assert!(out.contains("Showing 1 of 2 visit record(s)"));

    let empty = run(temp_dir.path(), &db_path, &["list", "--year", "2023", "--month", "1"]);
    assert!(stdout(&empty).contains("No visit records found"));
}

#[test]
fn test_cli_list_invalid_month_reports_validation_error() {
    let (temp_dir, db_path) = setup();

    let output = run(temp_dir.path(), &db_path, &["list", "--year", "2024", "--month", "13"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("ERR_VALIDATION_FAILED"));
}

#[test]
fn test_cli_reads_database_path_from_config_file() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("kaiz.toml"),
        "[database]\npath = \"configured/visits.db\"\n",
    )
    .unwrap();

    let output = kaiz(temp_dir.path())
        .args(["add", "-d", "2024-03-01", "-c", "Configured Co"])
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute CLI");

    assert!(output.status.success(), "Stderr: {}", stderr(&output));
    assert!(temp_dir.path().join("configured").join("visits.db").exists());
}
