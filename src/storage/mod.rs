//! Local key/value string store holding the database snapshot.
//!
//! Mirrors the semantics of a browser `localStorage`: string keys, string
//! values, a hard size ceiling per value.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::errors::{AppError, AppResult};

/// 4 MiB: values above this are persisted but reported as close to the limit.
pub const DEFAULT_SOFT_LIMIT: usize = 4 * 1024 * 1024;
/// 5 MiB: the historical browser `localStorage` ceiling.
pub const DEFAULT_HARD_LIMIT: usize = 5 * 1024 * 1024;

pub trait LocalStore: Send + Sync {
    fn get_item(&self, key: &str) -> AppResult<Option<String>>;

    /// Store `value` under `key`. A rejected write leaves the previous value
    /// in place.
    fn set_item(&self, key: &str, value: &str) -> AppResult<()>;

    /// Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> AppResult<()>;

    fn quota(&self) -> StorageQuota;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageQuota {
    pub soft_limit: usize,
    pub hard_limit: usize,
}

impl Default for StorageQuota {
    fn default() -> Self {
        Self {
            soft_limit: DEFAULT_SOFT_LIMIT,
            hard_limit: DEFAULT_HARD_LIMIT,
        }
    }
}

impl StorageQuota {
    pub fn new(soft_limit: usize, hard_limit: usize) -> Self {
        Self {
            soft_limit: soft_limit.min(hard_limit),
            hard_limit,
        }
    }

    pub fn check(&self, key: &str, size: usize) -> AppResult<()> {
        if size > self.hard_limit {
            return Err(AppError::StorageQuotaExceeded {
                key: key.to_string(),
                size,
                limit: self.hard_limit,
            });
        }
        Ok(())
    }

    pub fn is_near_limit(&self, size: usize) -> bool {
        size >= self.soft_limit
    }
}
