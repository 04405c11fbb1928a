//! Snapshot codec: the binary image of the in-memory database, stored in the
//! local store as a JSON array of byte values.

use crate::errors::{AppError, AppResult};
use crate::storage::LocalStore;
use crate::ui::messages::warning;
use rusqlite::{Connection, MAIN_DB};
use std::sync::Arc;

pub const DEFAULT_SNAPSHOT_KEY: &str = "sqlite_db_backup";

/// SQLite file header, first 16 bytes of every database image.
const SQLITE_MAGIC: &[u8] = b"SQLite format 3\0";

/// Encode a database image for a string-only store.
pub fn encode(bytes: &[u8]) -> AppResult<String> {
    Ok(serde_json::to_string(bytes)?)
}

pub fn decode(text: &str) -> AppResult<Vec<u8>> {
    serde_json::from_str::<Vec<u8>>(text)
        .map_err(|e| AppError::CorruptSnapshot(format!("snapshot is not a byte array: {e}")))
}

/// Binary image of the `main` database.
pub fn serialize(conn: &Connection) -> AppResult<Vec<u8>> {
    let data = conn.serialize(MAIN_DB)?;
    Ok(data.to_vec())
}

/// Build a new in-memory connection from a database image.
///
/// The image is checked before the connection is handed out: SQLite accepts
/// any bytes at deserialization time and only fails on first read.
pub fn open_image(bytes: &[u8]) -> Result<Connection, String> {
    if bytes.is_empty() {
        return Err("empty image".to_string());
    }
    if !bytes.starts_with(SQLITE_MAGIC) {
        return Err("missing SQLite header".to_string());
    }

    let mut conn = Connection::open_in_memory().map_err(|e| e.to_string())?;
    conn.deserialize_read_exact(MAIN_DB, bytes, bytes.len(), false)
        .map_err(|e| e.to_string())?;

    conn.query_row("SELECT COUNT(*) FROM sqlite_master", [], |row| {
        row.get::<_, i64>(0)
    })
    .map_err(|e| e.to_string())?;

    let check: String = conn
        .query_row("PRAGMA quick_check", [], |row| row.get(0))
        .map_err(|e| e.to_string())?;
    if check != "ok" {
        return Err(format!("integrity check failed: {check}"));
    }

    Ok(conn)
}

/// Reads and writes the snapshot under one fixed key of a [`LocalStore`].
pub struct SnapshotCodec {
    store: Arc<dyn LocalStore>,
    key: String,
}

impl SnapshotCodec {
    pub fn new(store: Arc<dyn LocalStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Persist the current image. Returns the encoded size.
    ///
    /// The connection is only read. A rejected write (quota) is returned to the
    /// caller and the previously stored snapshot stays as it was.
    pub fn save(&self, conn: &Connection) -> AppResult<usize> {
        let encoded = encode(&serialize(conn)?)?;
        let size = encoded.len();
        let quota = self.store.quota();

        if quota.is_near_limit(size) {
            warning(format!(
                "Snapshot is {} KiB, close to the local storage limit of {} KiB. Export the database file to keep a safe copy.",
                size / 1024,
                quota.hard_limit / 1024
            ));
        }

        self.store.set_item(&self.key, &encoded)?;
        Ok(size)
    }

    /// `Ok(None)` when nothing was saved yet. Unreadable content is reported as
    /// `CorruptSnapshot`.
    pub fn load(&self) -> AppResult<Option<Connection>> {
        let Some(text) = self.store.get_item(&self.key)? else {
            return Ok(None);
        };

        let bytes = decode(&text)?;
        let conn = open_image(&bytes).map_err(AppError::CorruptSnapshot)?;
        Ok(Some(conn))
    }

    /// Size of the stored snapshot text, `None` when nothing is stored.
    pub fn stored_size(&self) -> AppResult<Option<usize>> {
        Ok(self.store.get_item(&self.key)?.map(|text| text.len()))
    }

    /// Keep a copy of `conn` under `<key>.<suffix>`, next to the live snapshot.
    pub fn stash(&self, conn: &Connection, suffix: &str) -> AppResult<String> {
        let stash_key = format!("{}.{}", self.key, suffix);
        let encoded = encode(&serialize(conn)?)?;
        self.store.set_item(&stash_key, &encoded)?;
        Ok(stash_key)
    }
}
