//! Path utilities: expand ~ and pick a file name inside a directory.

use std::path::{Path, PathBuf};

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// `file` when given, otherwise `default_name` in the current directory.
pub fn resolve_output(file: Option<&str>, default_name: &str) -> PathBuf {
    match file {
        Some(f) => expand_tilde(f),
        None => Path::new(".").join(default_name),
    }
}
