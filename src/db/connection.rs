//! Owner of the single database handle.
//!
//! The handle is created lazily on first use, at most once per manager,
//! from the saved snapshot or from fresh schema. Callers never hold the
//! connection across calls: every access goes through [`ConnectionManager::with_conn`],
//! so an import that replaces the handle can never leave a stale reference.

use crate::config::Config;
use crate::core::snapshot::{self, SnapshotCodec};
use crate::db::migrate::{SchemaKind, detect_schema, missing_columns, run_pending_migrations};
use crate::errors::{AppError, AppResult};
use crate::storage::{FileStore, LocalStore};
use crate::ui::messages::warning;
use rusqlite::Connection;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

/// Suffix of the copy kept before a legacy snapshot is migrated.
pub const PRE_MIGRATION_SUFFIX: &str = "pre-v2";

/// Checks that the embedded engine can be used.
pub trait EngineRuntime: Send + Sync {
    fn is_available(&self) -> bool;
}

/// The SQLite library linked into the binary. Serialization needs 3.23+.
pub struct BundledSqlite;

impl EngineRuntime for BundledSqlite {
    fn is_available(&self) -> bool {
        rusqlite::version_number() >= 3_023_000
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandleId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Uninitialized,
    Initializing,
    Ready,
}

#[derive(Debug, Clone)]
pub struct ConnectOptions {
    /// How long to wait before the second and last runtime check.
    pub runtime_wait: Duration,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            runtime_wait: Duration::from_millis(500),
        }
    }
}

struct Handle {
    id: HandleId,
    conn: Connection,
}

enum Phase {
    Uninitialized,
    Initializing,
    Ready(Handle),
}

/// Outcome of a failed attempt, replayed to the callers that waited on it.
struct Failure {
    attempt: u64,
    runtime_missing: bool,
    message: String,
}

struct Slot {
    phase: Phase,
    attempt: u64,
    last_failure: Option<Failure>,
}

impl Slot {
    fn state(&self) -> ConnectionState {
        match self.phase {
            Phase::Uninitialized => ConnectionState::Uninitialized,
            Phase::Initializing => ConnectionState::Initializing,
            Phase::Ready(_) => ConnectionState::Ready,
        }
    }
}

pub struct ConnectionManager {
    runtime: Box<dyn EngineRuntime>,
    codec: SnapshotCodec,
    options: ConnectOptions,
    slot: Mutex<Slot>,
    settled: Condvar,
    init_runs: AtomicUsize,
    next_handle: AtomicU64,
}

impl ConnectionManager {
    pub fn new(
        runtime: Box<dyn EngineRuntime>,
        codec: SnapshotCodec,
        options: ConnectOptions,
    ) -> Self {
        Self {
            runtime,
            codec,
            options,
            slot: Mutex::new(Slot {
                phase: Phase::Uninitialized,
                attempt: 0,
                last_failure: None,
            }),
            settled: Condvar::new(),
            init_runs: AtomicUsize::new(0),
            next_handle: AtomicU64::new(1),
        }
    }

    /// Manager over the configured snapshot directory and the bundled engine.
    pub fn open(cfg: &Config) -> Self {
        let store: Arc<dyn LocalStore> =
            Arc::new(FileStore::new(cfg.storage_path(), cfg.quota()));
        let codec = SnapshotCodec::new(store, cfg.snapshot_key.clone());
        Self::new(Box::new(BundledSqlite), codec, cfg.connect_options())
    }

    pub fn codec(&self) -> &SnapshotCodec {
        &self.codec
    }

    pub fn state(&self) -> ConnectionState {
        self.lock().state()
    }

    /// Number of initialization attempts actually executed.
    pub fn init_runs(&self) -> usize {
        self.init_runs.load(Ordering::SeqCst)
    }

    /// Ensure the handle is ready and return its id.
    pub fn connect(&self) -> AppResult<HandleId> {
        let slot = self.ready_slot()?;
        match &slot.phase {
            Phase::Ready(h) => Ok(h.id),
            _ => Err(AppError::Other("connection not ready".into())),
        }
    }

    /// Run `func` against the ready handle. The lock is held for the whole call.
    pub fn with_conn<F, T>(&self, func: F) -> AppResult<T>
    where
        F: FnOnce(&mut Connection) -> AppResult<T>,
    {
        let mut slot = self.ready_slot()?;
        match &mut slot.phase {
            Phase::Ready(h) => func(&mut h.conn),
            _ => Err(AppError::Other("connection not ready".into())),
        }
    }

    /// Write the current image to the local store.
    pub fn save_snapshot(&self) -> AppResult<usize> {
        self.with_conn(|conn| self.codec.save(conn))
    }

    /// Binary image of the current handle, as it is at call time.
    pub fn export_bytes(&self) -> AppResult<Vec<u8>> {
        self.with_conn(|conn| snapshot::serialize(conn))
    }

    /// Replace the handle with one built from `bytes`.
    ///
    /// The new handle is fully built and migrated before the current one is
    /// touched, so invalid input leaves the loaded data as it was. The new
    /// image is snapshotted right away; a failed save is only reported.
    pub fn import_bytes(&self, bytes: &[u8]) -> AppResult<HandleId> {
        let conn = snapshot::open_image(bytes).map_err(AppError::ImportDecodeFailure)?;
        run_pending_migrations(&conn).map_err(|e| AppError::ImportDecodeFailure(e.to_string()))?;
        check_layout(&conn).map_err(AppError::ImportDecodeFailure)?;

        let mut slot = self.lock();
        while slot.state() == ConnectionState::Initializing {
            slot = self.wait(slot);
        }

        let handle = self.new_handle(conn);
        let id = handle.id;
        slot.phase = Phase::Ready(handle);
        self.settled.notify_all();

        if let Phase::Ready(h) = &slot.phase
            && let Err(e) = self.codec.save(&h.conn)
        {
            warning(format!("Imported database could not be saved locally: {e}"));
        }

        Ok(id)
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn wait<'a>(&self, guard: MutexGuard<'a, Slot>) -> MutexGuard<'a, Slot> {
        self.settled
            .wait(guard)
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn new_handle(&self, conn: Connection) -> Handle {
        Handle {
            id: HandleId(self.next_handle.fetch_add(1, Ordering::SeqCst)),
            conn,
        }
    }

    /// Lock the slot with the handle in `Ready`, initializing it if needed.
    ///
    /// Only one caller runs the initializer; the others sleep on the condvar
    /// until that attempt settles and then share its result.
    fn ready_slot(&self) -> AppResult<MutexGuard<'_, Slot>> {
        let mut slot = self.lock();

        loop {
            match slot.state() {
                ConnectionState::Ready => return Ok(slot),

                ConnectionState::Initializing => {
                    let attempt = slot.attempt;
                    while slot.state() == ConnectionState::Initializing && slot.attempt == attempt {
                        slot = self.wait(slot);
                    }

                    if let Some(f) = &slot.last_failure
                        && f.attempt == attempt
                    {
                        return Err(if f.runtime_missing {
                            AppError::RuntimeUnavailable(f.message.clone())
                        } else {
                            AppError::InitFailed(f.message.clone())
                        });
                    }
                }

                ConnectionState::Uninitialized => {
                    slot.phase = Phase::Initializing;
                    slot.attempt += 1;
                    let attempt = slot.attempt;
                    drop(slot);

                    let outcome = self.initialize();

                    slot = self.lock();
                    match outcome {
                        Ok(handle) => {
                            slot.phase = Phase::Ready(handle);
                            self.settled.notify_all();
                        }
                        Err(e) => {
                            slot.phase = Phase::Uninitialized;
                            slot.last_failure = Some(Failure {
                                attempt,
                                runtime_missing: matches!(e, AppError::RuntimeUnavailable(_)),
                                message: match &e {
                                    AppError::RuntimeUnavailable(m) | AppError::InitFailed(m) => {
                                        m.clone()
                                    }
                                    other => other.to_string(),
                                },
                            });
                            self.settled.notify_all();
                            return Err(e);
                        }
                    }
                }
            }
        }
    }

    fn ensure_runtime(&self) -> AppResult<()> {
        if self.runtime.is_available() {
            return Ok(());
        }

        thread::sleep(self.options.runtime_wait);

        if self.runtime.is_available() {
            Ok(())
        } else {
            Err(AppError::RuntimeUnavailable(format!(
                "SQLite engine still not loaded after waiting {} ms",
                self.options.runtime_wait.as_millis()
            )))
        }
    }

    /// Runtime check, snapshot load (corruption falls back to an empty
    /// database), then schema migrations.
    fn initialize(&self) -> AppResult<Handle> {
        self.init_runs.fetch_add(1, Ordering::SeqCst);

        self.ensure_runtime()?;

        let (conn, restored) = match self.codec.load() {
            Ok(Some(conn)) => (conn, true),
            Ok(None) => (Connection::open_in_memory()?, false),
            Err(AppError::CorruptSnapshot(reason)) => {
                warning(format!(
                    "Saved database snapshot is unreadable ({reason}), starting with an empty database."
                ));
                (Connection::open_in_memory()?, false)
            }
            Err(e) => return Err(e),
        };

        if restored && detect_schema(&conn)? == SchemaKind::LegacyWorkHours {
            match self.codec.stash(&conn, PRE_MIGRATION_SUFFIX) {
                Ok(key) => warning(format!("Legacy snapshot copied to '{key}' before migration.")),
                Err(e) => warning(format!("Could not keep a pre-migration copy: {e}")),
            }
        }

        let applied =
            run_pending_migrations(&conn).map_err(|e| AppError::Migration(e.to_string()))?;

        let (conn, restored) = match check_layout(&conn) {
            Ok(()) => (conn, restored),
            Err(reason) if restored => {
                warning(format!(
                    "Saved database snapshot is unusable ({reason}), starting with an empty database."
                ));
                let fresh = Connection::open_in_memory()?;
                run_pending_migrations(&fresh).map_err(|e| AppError::Migration(e.to_string()))?;
                (fresh, false)
            }
            Err(reason) => return Err(AppError::Migration(reason)),
        };

        if restored
            && applied > 0
            && let Err(e) = self.codec.save(&conn)
        {
            warning(format!("Migrated snapshot could not be saved: {e}"));
        }

        Ok(self.new_handle(conn))
    }
}

/// Reject a migrated database whose tables lack required columns.
fn check_layout(conn: &Connection) -> Result<(), String> {
    let missing = missing_columns(conn).map_err(|e| e.to_string())?;
    if missing.is_empty() {
        Ok(())
    } else {
        Err(format!("missing columns: {}", missing.join(", ")))
    }
}
