#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use staffroll::config::WritePolicy;
use staffroll::core::snapshot::{DEFAULT_SNAPSHOT_KEY, SnapshotCodec};
use staffroll::core::store::RecordStore;
use staffroll::db::connection::{BundledSqlite, ConnectOptions, ConnectionManager, EngineRuntime};
use staffroll::models::employee::Employee;
use staffroll::models::shift::Shift;
use staffroll::storage::{FileStore, LocalStore, MemoryStore, StorageQuota};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub fn staffroll() -> Command {
    cargo_bin_cmd!("staffroll")
}

/// Unique snapshot directory inside the system temp dir, emptied first.
pub fn setup_store(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_staffroll_store", name));
    fs::remove_dir_all(&path).ok();
    path.to_string_lossy().to_string()
}

/// Temporary output file path inside the temp dir, removed first.
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub fn fast_options() -> ConnectOptions {
    ConnectOptions {
        runtime_wait: Duration::from_millis(20),
    }
}

pub fn manager_with(store: Arc<dyn LocalStore>, runtime: Box<dyn EngineRuntime>) -> ConnectionManager {
    let codec = SnapshotCodec::new(store, DEFAULT_SNAPSHOT_KEY);
    ConnectionManager::new(runtime, codec, fast_options())
}

/// Manager over a fresh in-process store; the store is returned for inspection.
pub fn memory_manager() -> (Arc<ConnectionManager>, Arc<MemoryStore>) {
    let mem = Arc::new(MemoryStore::default());
    let manager = manager_with(mem.clone(), Box::new(BundledSqlite));
    (Arc::new(manager), mem)
}

pub fn memory_store() -> (RecordStore, Arc<MemoryStore>) {
    let (manager, mem) = memory_manager();
    (RecordStore::new(manager, WritePolicy::WriteThrough), mem)
}

/// Record store persisting into `dir`, as a separate CLI run would see it.
pub fn file_store(dir: &str) -> RecordStore {
    let files: Arc<dyn LocalStore> = Arc::new(FileStore::new(dir, StorageQuota::default()));
    let manager = manager_with(files, Box::new(BundledSqlite));
    RecordStore::new(Arc::new(manager), WritePolicy::WriteThrough)
}

pub fn employee(name: &str, registration: &str, role: &str) -> Employee {
    Employee::new(name, registration, role, Shift::Morning)
}

/// Init a store through the CLI and register two employees.
pub fn init_store_with_data(store: &str) {
    staffroll()
        .args(["--store", store, "--test", "init"])
        .assert()
        .success();

    staffroll()
        .args([
            "--store",
            store,
            "add",
            "--name",
            "Mario Rossi",
            "--registration",
            "M001",
            "--role",
            "Nurse",
            "--shift",
            "morning",
        ])
        .assert()
        .success();

    staffroll()
        .args([
            "--store",
            store,
            "add",
            "--name",
            "Anna Bianchi",
            "--registration",
            "M002",
            "--role",
            "Doctor",
        ])
        .assert()
        .success();
}
