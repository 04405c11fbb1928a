mod common;

use common::setup_store;
use staffroll::core::snapshot::{self, DEFAULT_SNAPSHOT_KEY, SnapshotCodec};
use staffroll::errors::AppError;
use staffroll::storage::{FileStore, LocalStore, MemoryStore, StorageQuota};
use std::path::Path;
use std::sync::Arc;

#[test]
fn file_store_round_trips_and_removes() {
    let dir = setup_store("file_store_basic");
    let store = FileStore::new(&dir, StorageQuota::default());

    assert_eq!(store.get_item("k").unwrap(), None);
    store.set_item("k", "v1").unwrap();
    store.set_item("k", "v2").unwrap();
    assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v2"));

    store.remove_item("k").unwrap();
    store.remove_item("k").unwrap();
    assert_eq!(store.get_item("k").unwrap(), None);
}

#[test]
fn file_store_keeps_keys_inside_its_directory() {
    let dir = setup_store("file_store_keys");
    let store = FileStore::new(&dir, StorageQuota::default());

    store.set_item("../escape", "x").unwrap();
    assert!(!Path::new(&dir).join("../escape.json").exists());
    assert_eq!(store.get_item("../escape").unwrap().as_deref(), Some("x"));
}

#[test]
fn over_quota_write_keeps_previous_value() {
    let store = MemoryStore::new(StorageQuota::new(4, 8));
    store.set_item("k", "small").unwrap();

    let err = store.set_item("k", "far too large").unwrap_err();
    assert!(matches!(
        err,
        AppError::StorageQuotaExceeded { limit: 8, .. }
    ));
    assert_eq!(store.get_item("k").unwrap().as_deref(), Some("small"));
}

#[test]
fn quota_soft_limit_never_exceeds_hard_limit() {
    let quota = StorageQuota::new(100, 10);
    assert_eq!(quota.soft_limit, 10);
    assert!(quota.is_near_limit(10));
    assert!(quota.check("k", 10).is_ok());
    assert!(quota.check("k", 11).is_err());
}

#[test]
fn snapshot_text_is_a_json_byte_array() {
    let text = snapshot::encode(&[0, 1, 255]).unwrap();
    assert_eq!(text, "[0,1,255]");
    assert_eq!(snapshot::decode(&text).unwrap(), vec![0, 1, 255]);
}

#[test]
fn decode_rejects_non_byte_content() {
    for bad in ["", "{}", "[256]", "[-1]", "\"abc\""] {
        assert!(matches!(
            snapshot::decode(bad),
            Err(AppError::CorruptSnapshot(_))
        ));
    }
}

#[test]
fn codec_saves_and_loads_an_image() {
    let mem = Arc::new(MemoryStore::default());
    let codec = SnapshotCodec::new(mem.clone(), DEFAULT_SNAPSHOT_KEY);
    assert!(codec.load().unwrap().is_none());
    assert_eq!(codec.stored_size().unwrap(), None);

    let conn = rusqlite::Connection::open_in_memory().unwrap();
    conn.execute_batch("CREATE TABLE t (v TEXT); INSERT INTO t VALUES ('hello');")
        .unwrap();
    codec.save(&conn).unwrap();

    let restored = codec.load().unwrap().unwrap();
    let v: String = restored
        .query_row("SELECT v FROM t", [], |r| r.get(0))
        .unwrap();
    assert_eq!(v, "hello");

    let saved = mem.get_item(DEFAULT_SNAPSHOT_KEY).unwrap().unwrap();
    assert_eq!(codec.stored_size().unwrap(), Some(saved.len()));
}
