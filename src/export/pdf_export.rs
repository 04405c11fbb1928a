// src/export/pdf_export.rs

use crate::core::timesheet::Timesheet;
use crate::errors::{AppError, AppResult};
use crate::export::model::{employees_to_table, get_headers};
use crate::export::pdf::PdfManager;
use crate::export::{EmployeeExport, notify_export_success};
use crate::ui::messages::info;
use std::path::Path;

/// Employee list as a paged PDF table.
pub(crate) fn export_pdf(rows: &[EmployeeExport], path: &Path, title: &str) -> AppResult<()> {
    info(format!("Exporting to PDF: {}", path.display()));

    let headers = get_headers();
    let data_vec = employees_to_table(rows);

    let mut pdf = PdfManager::new();
    pdf.write_table(title, &headers, &data_vec);

    pdf.save(path)
        .map_err(|e| AppError::Export(format!("PDF export error: {e}")))?;

    notify_export_success("PDF", path);
    Ok(())
}

/// Monthly attendance sheet for one employee.
pub fn export_timesheet(sheet: &Timesheet, path: &Path) -> AppResult<()> {
    info(format!(
        "Generating timesheet for {} ({} {}, {} working days): {}",
        sheet.employee.name,
        sheet.month_name(),
        sheet.year,
        sheet.working_days(),
        path.display()
    ));

    let mut pdf = PdfManager::new();
    pdf.write_timesheet(sheet);

    pdf.save(path)
        .map_err(|e| AppError::Export(format!("PDF export error: {e}")))?;

    notify_export_success("Timesheet", path);
    Ok(())
}
