use super::{LocalStore, StorageQuota};
use crate::errors::AppResult;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Process-local store, lost when dropped.
#[derive(Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
    quota: StorageQuota,
}

impl MemoryStore {
    pub fn new(quota: StorageQuota) -> Self {
        Self {
            items: Mutex::new(HashMap::new()),
            quota,
        }
    }

    fn items(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.items().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl LocalStore for MemoryStore {
    fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.items().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        self.quota.check(key, value.len())?;
        self.items().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> AppResult<()> {
        self.items().remove(key);
        Ok(())
    }

    fn quota(&self) -> StorageQuota {
        self.quota
    }
}
