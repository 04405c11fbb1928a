use super::{LocalStore, StorageQuota};
use crate::errors::AppResult;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// Directory-backed store: one file per key.
pub struct FileStore {
    dir: PathBuf,
    quota: StorageQuota,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>, quota: StorageQuota) -> Self {
        Self {
            dir: dir.into(),
            quota,
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // keys are app-defined, but keep them inside the directory
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

impl LocalStore for FileStore {
    fn get_item(&self, key: &str) -> AppResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> AppResult<()> {
        self.quota.check(key, value.len())?;

        fs::create_dir_all(&self.dir)?;
        let target = self.path_for(key);
        let tmp = target.with_extension("json.tmp");

        {
            let mut f = fs::File::create(&tmp)?;
            f.write_all(value.as_bytes())?;
            f.sync_all()?;
        }
        fs::rename(&tmp, &target)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> AppResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn quota(&self) -> StorageQuota {
        self.quota
    }
}
