// Integration tests for on-disk initialization and durability

use chrono::NaiveDate;
use kaiz_core::{ExErrorKind, VisitFields};
use kaiz_store::VisitStore;
use tempfile::TempDir;

fn sample() -> VisitFields {
    VisitFields::new()
        .with("visit_date", NaiveDate::from_ymd_opt(2024, 5, 20).unwrap())
        .with("company_name", "Durable Dies")
        .with("remarks", "first visit")
}

#[test]
fn test_open_is_idempotent_and_keeps_rows() {
    // Given: a store file with one visit
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.db");
    let sr_no = {
        let mut store = VisitStore::open(&path).unwrap();
        store.create(&sample()).unwrap()
    };

    // When: the same path is opened twice more
    let _ = VisitStore::open(&path).unwrap();
    let store = VisitStore::open(&path).unwrap();

    // Then: the visit is still there, unchanged
    assert_eq!(store.count().unwrap(), 1);
    let visit = store.get_by_id(sr_no).unwrap().unwrap();
    assert_eq!(visit.company_name, "Durable Dies");
    assert_eq!(store.path(), Some(path.as_path()));
}

#[test]
fn test_open_creates_missing_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kaiz").join("visits.db");

    let mut store = VisitStore::open(&path).unwrap();
    store.create(&sample()).unwrap();

    assert!(path.exists());
}

#[test]
fn test_serial_numbers_not_reused_after_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.db");

    let first = VisitStore::open(&path).unwrap().create(&sample()).unwrap();
    let second = VisitStore::open(&path).unwrap().create(&sample()).unwrap();

    assert!(second > first);
}

#[test]
fn test_unwritable_path_is_storage_unavailable() {
    // A regular file where a directory is expected cannot be created through
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("not_a_dir");
    std::fs::write(&blocker, b"plain file").unwrap();

    let err = VisitStore::open(blocker.join("data.db")).err().unwrap();

    assert_eq!(err.kind(), ExErrorKind::StorageUnavailable);
}

#[test]
fn test_schema_enforces_enum_checks_for_raw_writes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.db");
    drop(VisitStore::open(&path).unwrap());

    let conn = rusqlite::Connection::open(&path).unwrap();
    let result = conn.execute(
        "INSERT INTO visits (visit_date, company_name, load_status, created_at, updated_at)
         VALUES ('2024-01-01', 'Raw', 'MAYBE', 0, 0)",
        [],
    );

    assert!(result.is_err(), "CHECK constraint should reject MAYBE");
}
