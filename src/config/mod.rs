use crate::db::connection::ConnectOptions;
use crate::errors::{AppError, AppResult};
use crate::storage::{DEFAULT_HARD_LIMIT, DEFAULT_SOFT_LIMIT, StorageQuota};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

pub mod migrate;

/// Snapshot persistence after a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum WritePolicy {
    /// Save the snapshot after every successful mutation.
    #[default]
    WriteThrough,
    /// Save only when the caller flushes.
    Deferred,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_storage_dir")]
    pub storage_dir: String,
    #[serde(default = "default_snapshot_key")]
    pub snapshot_key: String,
    #[serde(default = "default_export_file_name")]
    pub export_file_name: String,
    #[serde(default = "default_soft_quota")]
    pub soft_quota_bytes: usize,
    #[serde(default = "default_hard_quota")]
    pub hard_quota_bytes: usize,
    #[serde(default = "default_runtime_wait")]
    pub runtime_wait_ms: u64,
    #[serde(default)]
    pub write_policy: WritePolicy,
}

fn default_storage_dir() -> String {
    Config::config_dir()
        .join("storage")
        .to_string_lossy()
        .to_string()
}
fn default_snapshot_key() -> String {
    crate::core::snapshot::DEFAULT_SNAPSHOT_KEY.to_string()
}
fn default_export_file_name() -> String {
    "staffroll.sqlite".to_string()
}
fn default_soft_quota() -> usize {
    DEFAULT_SOFT_LIMIT
}
fn default_hard_quota() -> usize {
    DEFAULT_HARD_LIMIT
}
fn default_runtime_wait() -> u64 {
    500
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
            snapshot_key: default_snapshot_key(),
            export_file_name: default_export_file_name(),
            soft_quota_bytes: default_soft_quota(),
            hard_quota_bytes: default_hard_quota(),
            runtime_wait_ms: default_runtime_wait(),
            write_policy: WritePolicy::default(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("staffroll")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".staffroll")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("staffroll.conf")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| AppError::ConfigLoad(format!("{}: {e}", path.display())))?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::ConfigLoad(format!("{}: {e}", path.display())))
    }

    pub fn save(&self) -> AppResult<()> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir).map_err(|e| AppError::ConfigSave(e.to_string()))?;

        let yaml = serde_yaml::to_string(self).map_err(|e| AppError::ConfigSave(e.to_string()))?;
        let mut file = fs::File::create(Self::config_file())
            .map_err(|e| AppError::ConfigSave(e.to_string()))?;
        file.write_all(yaml.as_bytes())
            .map_err(|e| AppError::ConfigSave(e.to_string()))?;
        Ok(())
    }

    pub fn storage_path(&self) -> PathBuf {
        expand_tilde(&self.storage_dir)
    }

    pub fn quota(&self) -> StorageQuota {
        StorageQuota::new(self.soft_quota_bytes, self.hard_quota_bytes)
    }

    pub fn connect_options(&self) -> ConnectOptions {
        ConnectOptions {
            runtime_wait: Duration::from_millis(self.runtime_wait_ms),
        }
    }

    /// Initialize configuration file and snapshot directory.
    pub fn init_all(&self, is_test: bool) -> AppResult<()> {
        fs::create_dir_all(self.storage_path())?;

        if !is_test {
            self.save()?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        println!("✅ Storage:     {:?}", self.storage_path());
        Ok(())
    }
}
