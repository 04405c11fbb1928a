//! Unified application error type.
//! Every layer (storage, db, core, cli) returns AppError so that the CLI can
//! turn failures into targeted messages in one place.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / encoding
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Engine / connection lifecycle
    // ---------------------------
    #[error("Database engine runtime is not available: {0}")]
    RuntimeUnavailable(String),

    #[error("Database initialization failed: {0}")]
    InitFailed(String),

    #[error("Stored snapshot is unreadable: {0}")]
    CorruptSnapshot(String),

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Local store
    // ---------------------------
    #[error("Storage quota exceeded for '{key}': {size} bytes (limit {limit} bytes)")]
    StorageQuotaExceeded {
        key: String,
        size: usize,
        limit: usize,
    },

    // ---------------------------
    // Record store
    // ---------------------------
    #[error("Registration '{0}' is already in use")]
    DuplicateKey(String),

    #[error("Cannot update an employee without an id")]
    MissingIdentifier,

    #[error("Employee #{0} not found")]
    EmployeeNotFound(i64),

    #[error("Invalid employee: {0}")]
    InvalidEmployee(String),

    #[error("Invalid shift: {0}")]
    InvalidShift(String),

    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    // ---------------------------
    // Import / export
    // ---------------------------
    #[error("Import failed, not a valid SQLite database: {0}")]
    ImportDecodeFailure(String),

    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration: {0}")]
    ConfigLoad(String),

    #[error("Failed to save configuration: {0}")]
    ConfigSave(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// True for the failures the store downgrades to a warning instead of
    /// propagating to the caller.
    pub fn is_recoverable_persistence(&self) -> bool {
        matches!(
            self,
            AppError::StorageQuotaExceeded { .. } | AppError::CorruptSnapshot(_)
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
