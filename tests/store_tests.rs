// tests/store_tests.rs

//! Integration tests for the append-only snapshot store.

use chrono::{Duration, Utc};
use procwatch::collector::ProcessSnapshot;
use procwatch::store::SnapshotStore;
use tempfile::{TempDir, tempdir};

fn open_store() -> (TempDir, SnapshotStore) {
    let dir = tempdir().expect("tempdir");
    let store = SnapshotStore::open(&dir.path().join("history.db")).expect("open store");
    (dir, store)
}

fn sample(pid: u32, path: &str) -> ProcessSnapshot {
    let mut snap = ProcessSnapshot::new(pid, 1, format!("proc{pid}"), path.to_string());
    snap.exists = true;
    snap.digest = "aabbccdd".into();
    snap
}

#[test]
fn schema_creation_is_idempotent_across_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.db");
    {
        let store = SnapshotStore::open(&path).unwrap();
        store.ensure_schema().unwrap();
        store.ensure_schema().unwrap();
    }
    // Re-opening applies the schema again against the existing file.
    let store = SnapshotStore::open(&path).unwrap();
    assert_eq!(store.row_count().unwrap(), 0);
}

#[test]
fn appending_twice_accumulates_rows() {
    let (_dir, mut store) = open_store();
    let batch = vec![sample(100, "/bin/x"), sample(200, "/bin/y")];

    let t1 = Utc::now();
    let t2 = t1 + Duration::seconds(30);
    assert_eq!(store.append(&batch, t1).unwrap(), 2);
    assert_eq!(store.append(&batch, t2).unwrap(), 2);

    // Append-only: the second cycle never overwrites the first.
    assert_eq!(store.row_count().unwrap(), 4);
}

#[test]
fn invalid_snapshots_are_never_persisted() {
    let (_dir, mut store) = open_store();

    let root_path = ProcessSnapshot::new(7, 1, "init".into(), "/".into());
    let empty_path = ProcessSnapshot::new(8, 1, "kthreadd".into(), String::new());
    assert!(!root_path.valid);
    assert!(!empty_path.valid);

    let batch = vec![sample(9, "/bin/z"), root_path, empty_path];
    assert_eq!(store.append(&batch, Utc::now()).unwrap(), 1);
    assert_eq!(store.row_count().unwrap(), 1);
}

#[test]
fn persisted_rows_survive_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.db");
    {
        let mut store = SnapshotStore::open(&path).unwrap();
        store.append(&[sample(10, "/bin/a")], Utc::now()).unwrap();
    }
    let store = SnapshotStore::open(&path).unwrap();
    assert_eq!(store.row_count().unwrap(), 1);
}
