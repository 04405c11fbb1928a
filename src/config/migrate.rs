//! Configuration file upgrades: report and fill keys added by newer versions.

use super::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Keys of the current configuration layout, in file order.
fn expected_keys() -> AppResult<Mapping> {
    let defaults = serde_yaml::to_value(Config::default())
        .map_err(|e| AppError::Config(e.to_string()))?;
    match defaults {
        Value::Mapping(m) => Ok(m),
        _ => Err(AppError::Config("default configuration is not a mapping".into())),
    }
}

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::ConfigLoad(format!("{}: {e}", path.display())))?;
    let yaml: Value = serde_yaml::from_str(&content)
        .map_err(|e| AppError::ConfigLoad(format!("{}: {e}", path.display())))?;

    match yaml {
        Value::Mapping(m) => Ok(m),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::ConfigLoad(format!(
            "{}: top level must be a mapping",
            path.display()
        ))),
    }
}

/// Keys present in the defaults but missing from the file at `path`.
pub fn missing_keys(path: &Path) -> AppResult<Vec<String>> {
    let current = read_mapping(path)?;
    let expected = expected_keys()?;

    Ok(expected
        .keys()
        .filter(|k| !current.contains_key(*k))
        .filter_map(|k| k.as_str().map(str::to_string))
        .collect())
}

/// Keys in the file that the current version does not know.
pub fn unknown_keys(path: &Path) -> AppResult<Vec<String>> {
    let current = read_mapping(path)?;
    let expected = expected_keys()?;

    Ok(current
        .keys()
        .filter(|k| !expected.contains_key(*k))
        .filter_map(|k| k.as_str().map(str::to_string))
        .collect())
}

/// Add every missing key with its default value. Existing values and unknown
/// keys are kept as they are.
///
/// Returns:
///   Ok(true)  → file updated
///   Ok(false) → nothing to do
pub fn fill_missing_keys(path: &Path) -> AppResult<bool> {
    let mut current = read_mapping(path)?;
    let expected = expected_keys()?;
    let mut changed = false;

    for (k, v) in expected {
        if !current.contains_key(&k) {
            if let Some(name) = k.as_str() {
                info(format!("Adding missing configuration key '{name}'"));
            }
            current.insert(k, v);
            changed = true;
        }
    }

    if changed {
        let yaml = serde_yaml::to_string(&Value::Mapping(current))
            .map_err(|e| AppError::ConfigSave(e.to_string()))?;
        fs::write(path, yaml).map_err(|e| AppError::ConfigSave(e.to_string()))?;
        success(format!("Configuration updated: {}", path.display()));
    }

    Ok(changed)
}
