mod common;

use common::{employee, memory_store, temp_out};
use staffroll::core::backup::BackupLogic;
use staffroll::core::snapshot;
use staffroll::errors::AppError;
use std::fs;
use std::path::Path;

#[test]
fn export_then_import_restores_the_same_rows() {
    let (source, _) = memory_store();
    source.add_employee(&employee("Ann", "X1", "Nurse")).unwrap();
    source.add_employee(&employee("Bob", "X2", "Porter")).unwrap();

    let out = temp_out("backup_roundtrip", "sqlite");
    let written = BackupLogic::export_to_file(source.manager(), Path::new(&out), false, true).unwrap();
    assert!(fs::read(&written).unwrap().starts_with(b"SQLite format 3\0"));

    let (target, _) = memory_store();
    target.add_employee(&employee("Zed", "Z9", "Clerk")).unwrap();
    BackupLogic::import_from_file(target.manager(), &written).unwrap();

    let names: Vec<String> = target
        .list_employees()
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, vec!["Ann", "Bob"]);
}

#[test]
fn compressed_export_can_be_imported() {
    let (source, _) = memory_store();
    source.add_employee(&employee("Ann", "X1", "Nurse")).unwrap();

    let out = temp_out("backup_zip", "sqlite");
    fs::remove_file(Path::new(&out).with_extension("zip")).ok();
    let zip = BackupLogic::export_to_file(source.manager(), Path::new(&out), true, true).unwrap();
    assert_eq!(zip.extension().and_then(|e| e.to_str()), Some("zip"));

    let (target, _) = memory_store();
    BackupLogic::import_from_file(target.manager(), &zip).unwrap();
    assert_eq!(target.count_employees().unwrap(), 1);
}

#[test]
fn import_replaces_the_handle() {
    let (store, _) = memory_store();
    let before = store.manager().connect().unwrap();

    let bytes = store.manager().export_bytes().unwrap();
    let after = store.manager().import_bytes(&bytes).unwrap();

    assert_ne!(before, after);
    assert_eq!(store.manager().connect().unwrap(), after);
}

#[test]
fn exported_image_reflects_current_rows() {
    let (store, _) = memory_store();
    store.add_employee(&employee("Ann", "X1", "Nurse")).unwrap();

    let bytes = store.manager().export_bytes().unwrap();
    let conn = snapshot::open_image(&bytes).unwrap();
    let n: i64 = conn
        .query_row("SELECT COUNT(*) FROM employees", [], |r| r.get(0))
        .unwrap();
    assert_eq!(n, 1);
}

#[test]
fn invalid_import_leaves_data_untouched() {
    let (store, _) = memory_store();
    store.add_employee(&employee("Ann", "X1", "Nurse")).unwrap();
    let handle = store.manager().connect().unwrap();

    let err = store.manager().import_bytes(b"hello, not a database").unwrap_err();
    assert!(matches!(err, AppError::ImportDecodeFailure(_)));

    let err = store.manager().import_bytes(&[]).unwrap_err();
    assert!(matches!(err, AppError::ImportDecodeFailure(_)));

    assert_eq!(store.manager().connect().unwrap(), handle);
    assert_eq!(store.list_employees().unwrap()[0].name, "Ann");
}

#[test]
fn import_of_missing_file_is_an_io_error() {
    let (store, _) = memory_store();
    let err = BackupLogic::import_from_file(store.manager(), Path::new("/nonexistent/staffroll.sqlite"))
        .unwrap_err();
    assert!(matches!(err, AppError::Io(_)));
}

#[test]
fn imported_data_is_saved_locally() {
    let (source, _) = memory_store();
    source.add_employee(&employee("Ann", "X1", "Nurse")).unwrap();
    let bytes = source.manager().export_bytes().unwrap();

    let (target, mem) = memory_store();
    target.manager().import_bytes(&bytes).unwrap();

    let saved = staffroll::storage::LocalStore::get_item(
        mem.as_ref(),
        staffroll::core::snapshot::DEFAULT_SNAPSHOT_KEY,
    )
    .unwrap()
    .unwrap();
    let conn = snapshot::open_image(&snapshot::decode(&saved).unwrap()).unwrap();
    let name: String = conn
        .query_row("SELECT name FROM employees", [], |r| r.get(0))
        .unwrap();
    assert_eq!(name, "Ann");
}

#[test]
fn import_with_foreign_table_layout_is_rejected() {
    let foreign = rusqlite::Connection::open_in_memory().unwrap();
    foreign
        .execute_batch(
            "CREATE TABLE employees (id INTEGER PRIMARY KEY, name TEXT);
             INSERT INTO employees (name) VALUES ('Stranger');",
        )
        .unwrap();
    let bytes = snapshot::serialize(&foreign).unwrap();

    let (target, mem) = memory_store();
    target.add_employee(&employee("Ann", "X1", "Nurse")).unwrap();
    let before = target.manager().connect().unwrap();

    let err = target.manager().import_bytes(&bytes).unwrap_err();
    match err {
        AppError::ImportDecodeFailure(reason) => assert!(reason.contains("employees.registration")),
        other => panic!("unexpected error: {other:?}"),
    }

    assert_eq!(target.manager().connect().unwrap(), before);
    let names: Vec<String> = target
        .list_employees()
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, vec!["Ann"]);
    target.add_employee(&employee("Bob", "X2", "Porter")).unwrap();

    let saved = staffroll::storage::LocalStore::get_item(
        mem.as_ref(),
        staffroll::core::snapshot::DEFAULT_SNAPSHOT_KEY,
    )
    .unwrap()
    .unwrap();
    let conn = snapshot::open_image(&snapshot::decode(&saved).unwrap()).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM employees", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 2);
}
