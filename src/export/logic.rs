// src/export/logic.rs

use crate::core::store::RecordStore;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::EmployeeExport;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::pdf_export::export_pdf;
use crate::export::xlsx::export_xlsx;
use crate::ui::messages::warning;
use std::fs;
use std::path::Path;

/// High-level employee list export.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the employee list, optionally filtered by `search`.
    ///
    /// Returns the number of exported rows; nothing is written when the
    /// selection is empty.
    pub fn export(
        store: &RecordStore,
        format: ExportFormat,
        path: &Path,
        search: Option<&str>,
        force: bool,
    ) -> AppResult<usize> {
        let employees = match search {
            Some(term) => store.search_employees(term)?,
            None => store.list_employees()?,
        };

        if employees.is_empty() {
            warning("No employees found for the selected filter.");
            return Ok(0);
        }

        ensure_writable(path, force)?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let rows: Vec<EmployeeExport> = employees.iter().map(EmployeeExport::from).collect();

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
            ExportFormat::Xlsx => export_xlsx(&rows, path)?,
            ExportFormat::Pdf => export_pdf(&rows, path, &build_pdf_title(search))?,
        }

        Ok(rows.len())
    }
}

fn build_pdf_title(search: Option<&str>) -> String {
    match search {
        Some(term) => format!("Employees matching \"{term}\""),
        None => "Employees".to_string(),
    }
}
