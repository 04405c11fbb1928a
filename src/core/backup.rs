//! Database file export (download) and import (upload).

use crate::db::connection::{ConnectionManager, HandleId};
use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::ui::messages::{info, success, warning};
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Write the current database image to `dest`. With `compress` only a
    /// `.zip` next to `dest` is written. Returns the final path.
    pub fn export_to_file(
        manager: &ConnectionManager,
        dest: &Path,
        compress: bool,
        force: bool,
    ) -> AppResult<PathBuf> {
        let final_target = if compress {
            dest.with_extension("zip")
        } else {
            dest.to_path_buf()
        };
        ensure_writable(&final_target, force)?;

        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let bytes = manager.export_bytes()?;

        let final_path = if compress {
            write_zip(&final_target, entry_name(dest), &bytes)?
        } else {
            fs::write(dest, &bytes)?;
            dest.to_path_buf()
        };

        success(format!(
            "Database exported: {} ({} KiB)",
            final_path.display(),
            bytes.len().div_ceil(1024)
        ));

        let target = final_path.to_string_lossy().to_string();
        let logged = manager.with_conn(|conn| {
            ttlog(conn, "backup", &target, if compress {
                "Database file exported and compressed"
            } else {
                "Database file exported"
            })
        });
        match logged {
            Ok(()) => {
                if let Err(e) = manager.save_snapshot() {
                    warning(format!("Snapshot save failed: {e}"));
                }
            }
            Err(e) => warning(format!("Failed to write internal log: {e}")),
        }

        Ok(final_path)
    }

    /// Replace the loaded database with the content of `src`
    /// (`.sqlite`/`.db`, or a `.zip` holding one).
    pub fn import_from_file(manager: &ConnectionManager, src: &Path) -> AppResult<HandleId> {
        if !src.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("File not found: {}", src.display()),
            )
            .into());
        }

        let bytes = if is_zip(src) {
            read_first_zip_entry(src)?
        } else {
            fs::read(src)?
        };

        info(format!("Importing {} ({} bytes)...", src.display(), bytes.len()));
        let id = manager.import_bytes(&bytes)?;

        let target = src.to_string_lossy().to_string();
        let logged = manager.with_conn(|conn| {
            ttlog(conn, "import", &target, "Database replaced by imported file")
        });
        match logged {
            Ok(()) => {
                // keep the local copy in step with the log row
                if let Err(e) = manager.save_snapshot() {
                    warning(format!("Imported database could not be saved locally: {e}"));
                }
            }
            Err(e) => warning(format!("Failed to write internal log: {e}")),
        }

        Ok(id)
    }
}

fn entry_name(dest: &Path) -> String {
    dest.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "database.sqlite".to_string())
}

fn is_zip(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("zip"))
        .unwrap_or(false)
}

fn write_zip(zip_path: &Path, entry: String, bytes: &[u8]) -> AppResult<PathBuf> {
    let file = fs::File::create(zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file(entry, options).map_err(std::io::Error::other)?;
    zip.write_all(bytes)?;
    zip.finish().map_err(std::io::Error::other)?;

    Ok(zip_path.to_path_buf())
}

fn read_first_zip_entry(path: &Path) -> AppResult<Vec<u8>> {
    let file = fs::File::open(path)?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| AppError::ImportDecodeFailure(format!("unreadable zip archive: {e}")))?;

    if archive.len() == 0 {
        return Err(AppError::ImportDecodeFailure("zip archive is empty".into()));
    }

    let mut entry = archive
        .by_index(0)
        .map_err(|e| AppError::ImportDecodeFailure(format!("unreadable zip entry: {e}")))?;

    let mut bytes = Vec::new();
    entry.read_to_end(&mut bytes)?;
    Ok(bytes)
}
