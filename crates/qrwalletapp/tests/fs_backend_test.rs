use chrono::{TimeZone, Utc};
use qrwalletapp::model::QrRecord;
use qrwalletapp::store::backend::StorageBackend;
use qrwalletapp::store::fs_backend::{FsBackend, MARKER_FILE, RECORDS_FILE};
use qrwalletapp::store::RecordStore;
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, FsBackend) {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path().to_path_buf());
    (dir, backend)
}

fn assert_no_tmp_files(dir: &TempDir) {
    for entry in fs::read_dir(dir.path()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}

#[test]
fn test_missing_files_read_as_none() {
    let (_dir, backend) = setup();
    assert!(backend.read_records().unwrap().is_none());
    assert!(backend.read_marker().unwrap().is_none());
    assert!(backend.list_backups().unwrap().is_empty());
}

#[test]
fn test_atomic_write_artifacts() {
    let (dir, backend) = setup();

    backend.write_records(b"{\"codes\": []}").unwrap();
    backend.write_marker(b"{}").unwrap();

    assert_eq!(
        fs::read(dir.path().join(RECORDS_FILE)).unwrap(),
        b"{\"codes\": []}"
    );
    assert_eq!(fs::read(dir.path().join(MARKER_FILE)).unwrap(), b"{}");
    assert_no_tmp_files(&dir);
}

#[test]
fn test_write_creates_missing_root() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("a").join("b");
    let backend = FsBackend::new(nested.clone());

    backend.write_records(b"[]").unwrap();
    assert!(nested.join(RECORDS_FILE).exists());
}

#[test]
fn test_backup_preserves_bytes_and_lists_in_order() {
    let (dir, backend) = setup();
    let garbage = vec![0xff, 0x00, b'{', 0xfe];
    fs::write(dir.path().join(RECORDS_FILE), &garbage).unwrap();

    let stamp = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
    let first = backend.backup_records(stamp).unwrap();
    let second = backend.backup_records(stamp).unwrap();

    assert_eq!(
        first.file_name().unwrap().to_str().unwrap(),
        "qr_codes_backup_1700000000000.json"
    );
    assert_ne!(first, second);
    assert_eq!(fs::read(&first).unwrap(), garbage);
    assert_eq!(fs::read(&second).unwrap(), garbage);

    // The original stays where it was; resetting it is the caller's job.
    assert_eq!(fs::read(dir.path().join(RECORDS_FILE)).unwrap(), garbage);
    assert_eq!(backend.list_backups().unwrap(), vec![first, second]);
}

#[test]
fn test_backup_without_records_file_fails() {
    let (_dir, backend) = setup();
    assert!(backend.backup_records(Utc::now()).is_err());
}

#[test]
fn test_record_store_round_trip_on_disk() {
    let (dir, backend) = setup();
    let store = RecordStore::new(backend);

    let a = store.add_by_content("https://a.example", &[]).unwrap();
    let b = store
        .add_by_content("https://b.example", std::slice::from_ref(&a))
        .unwrap();
    let current = vec![a, b];

    let reordered = store.reorder(1, 0, &current).unwrap();
    let reloaded = RecordStore::new(FsBackend::new(dir.path().to_path_buf()))
        .load()
        .unwrap();
    assert_eq!(reloaded, reordered);

    let text = fs::read_to_string(dir.path().join(RECORDS_FILE)).unwrap();
    assert!(text.contains("\"codes\""));
    assert!(text.contains("\"timestamp\""));
    assert_no_tmp_files(&dir);
}

#[test]
fn test_reads_files_with_foreign_ids_and_extra_fields() {
    let (dir, backend) = setup();
    fs::write(
        dir.path().join(RECORDS_FILE),
        r#"{"codes":[{
            "id": "qr_1700000000000_4821",
            "content": "x",
            "name": "Old",
            "timestamp": 1700000000000,
            "color": "red"
        }]}"#,
    )
    .unwrap();

    let records: Vec<QrRecord> = RecordStore::new(backend).load().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "qr_1700000000000_4821");
    assert_eq!(records[0].created_at.timestamp_millis(), 1_700_000_000_000);
}
