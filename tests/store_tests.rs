mod common;

use common::{employee, memory_manager, memory_store};
use staffroll::config::WritePolicy;
use staffroll::core::snapshot::DEFAULT_SNAPSHOT_KEY;
use staffroll::core::store::{REPORT_HEADER_KEY, RecordStore};
use staffroll::errors::AppError;
use staffroll::models::shift::Shift;
use staffroll::storage::LocalStore;

#[test]
fn add_assigns_distinct_ids_and_lists_by_name() {
    let (store, _) = memory_store();

    let a = store.add_employee(&employee("zoe", "R1", "Clerk")).unwrap();
    let b = store.add_employee(&employee("Adam", "R2", "Clerk")).unwrap();
    let c = store.add_employee(&employee("mia", "R3", "Clerk")).unwrap();

    assert!(a != b && b != c && a != c);

    let names: Vec<String> = store
        .list_employees()
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, vec!["Adam", "mia", "zoe"]);
}

#[test]
fn list_on_fresh_store_is_empty() {
    let (store, _) = memory_store();
    assert!(store.list_employees().unwrap().is_empty());
    assert_eq!(store.count_employees().unwrap(), 0);
}

#[test]
fn duplicate_registration_is_rejected_and_table_unchanged() {
    let (store, _) = memory_store();
    store.add_employee(&employee("Ann", "X1", "Nurse")).unwrap();

    let err = store
        .add_employee(&employee("Bob", "X1", "Porter"))
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicateKey(ref r) if r == "X1"));

    let all = store.list_employees().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Ann");
}

#[test]
fn update_to_taken_registration_is_rejected() {
    let (store, _) = memory_store();
    store.add_employee(&employee("Ann", "X1", "Nurse")).unwrap();
    let id = store.add_employee(&employee("Bob", "X2", "Porter")).unwrap();

    let mut bob = store.find_employee(id).unwrap().unwrap();
    bob.registration = "X1".into();

    assert!(matches!(
        store.update_employee(&bob),
        Err(AppError::DuplicateKey(_))
    ));
    assert_eq!(store.find_employee(id).unwrap().unwrap().registration, "X2");
}

#[test]
fn update_overwrites_every_field() {
    let (store, _) = memory_store();
    let id = store.add_employee(&employee("Ann", "X1", "Nurse")).unwrap();

    let mut ann = store.find_employee(id).unwrap().unwrap();
    ann.name = "Ann Smith".into();
    ann.role = "Head nurse".into();
    ann.shift = Shift::Night;
    store.update_employee(&ann).unwrap();

    let stored = store.find_employee(id).unwrap().unwrap();
    assert_eq!(stored.name, "Ann Smith");
    assert_eq!(stored.role, "Head nurse");
    assert_eq!(stored.shift, Shift::Night);
    assert_eq!(stored.registration, "X1");
}

#[test]
fn update_without_id_is_missing_identifier() {
    let (store, _) = memory_store();
    store.add_employee(&employee("Ann", "X1", "Nurse")).unwrap();

    let err = store
        .update_employee(&employee("Ann", "X1", "Nurse"))
        .unwrap_err();
    assert!(matches!(err, AppError::MissingIdentifier));
    assert_eq!(store.count_employees().unwrap(), 1);
}

#[test]
fn update_unknown_id_is_not_found() {
    let (store, _) = memory_store();
    let ghost = employee("Ghost", "G1", "None").with_id(42);
    assert!(matches!(
        store.update_employee(&ghost),
        Err(AppError::EmployeeNotFound(42))
    ));
}

#[test]
fn blank_fields_are_rejected() {
    let (store, _) = memory_store();
    assert!(matches!(
        store.add_employee(&employee("  ", "X1", "Nurse")),
        Err(AppError::InvalidEmployee(_))
    ));
    assert!(matches!(
        store.add_employee(&employee("Ann", "", "Nurse")),
        Err(AppError::InvalidEmployee(_))
    ));
}

#[test]
fn delete_is_idempotent() {
    let (store, _) = memory_store();
    let id = store.add_employee(&employee("Ann", "X1", "Nurse")).unwrap();

    assert!(store.delete_employee(id).unwrap());
    assert!(!store.delete_employee(id).unwrap());
    assert!(!store.delete_employee(999).unwrap());
    assert!(store.list_employees().unwrap().is_empty());
}

#[test]
fn search_matches_name_registration_and_role() {
    let (store, _) = memory_store();
    store.add_employee(&employee("Mario Rossi", "M001", "Nurse")).unwrap();
    store.add_employee(&employee("Anna Bianchi", "D002", "Doctor")).unwrap();

    assert_eq!(store.search_employees("rossi").unwrap().len(), 1);
    assert_eq!(store.search_employees("d002").unwrap().len(), 1);
    assert_eq!(store.search_employees("DOCTOR").unwrap()[0].name, "Anna Bianchi");
    assert!(store.search_employees("nobody").unwrap().is_empty());
}

#[test]
fn config_values_round_trip() {
    let (store, _) = memory_store();

    assert_eq!(store.get_config(REPORT_HEADER_KEY).unwrap(), None);

    store.set_config(REPORT_HEADER_KEY, "<b>Hospital</b>").unwrap();
    store.set_config(REPORT_HEADER_KEY, "<b>Clinic</b>").unwrap();
    assert_eq!(
        store.get_config(REPORT_HEADER_KEY).unwrap().as_deref(),
        Some("<b>Clinic</b>")
    );

    assert!(store.delete_config(REPORT_HEADER_KEY).unwrap());
    assert!(!store.delete_config(REPORT_HEADER_KEY).unwrap());
    assert_eq!(store.get_config(REPORT_HEADER_KEY).unwrap(), None);
}

#[test]
fn write_through_saves_after_each_write() {
    let (store, mem) = memory_store();
    store.add_employee(&employee("Ann", "X1", "Nurse")).unwrap();
    let first = mem.get_item(DEFAULT_SNAPSHOT_KEY).unwrap().unwrap();

    store.add_employee(&employee("Bob", "X2", "Nurse")).unwrap();
    let second = mem.get_item(DEFAULT_SNAPSHOT_KEY).unwrap().unwrap();

    assert_ne!(first, second);
}

#[test]
fn deferred_policy_waits_for_flush() {
    let (manager, mem) = memory_manager();
    let store = RecordStore::new(manager, WritePolicy::Deferred);

    store.add_employee(&employee("Ann", "X1", "Nurse")).unwrap();
    assert!(mem.get_item(DEFAULT_SNAPSHOT_KEY).unwrap().is_none());

    store.flush();
    assert!(mem.get_item(DEFAULT_SNAPSHOT_KEY).unwrap().is_some());
}

#[test]
fn writes_are_recorded_in_the_internal_log() {
    let (store, _) = memory_store();
    let id = store.add_employee(&employee("Ann", "X1", "Nurse")).unwrap();
    store.delete_employee(id).unwrap();

    let ops: Vec<String> = store
        .manager()
        .with_conn(|conn| staffroll::db::log::load_log(conn))
        .unwrap()
        .into_iter()
        .map(|e| e.operation)
        .collect();

    assert!(ops.contains(&"add".to_string()));
    assert!(ops.contains(&"del".to_string()));
}
