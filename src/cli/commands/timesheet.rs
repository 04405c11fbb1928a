use crate::cli::parser::Commands;
use crate::core::store::{REPORT_HEADER_KEY, RecordStore};
use crate::core::timesheet::Timesheet;
use crate::errors::{AppError, AppResult};
use crate::export::export_timesheet;
use crate::export::fs_utils::ensure_writable;
use crate::utils::date::today;
use crate::utils::formatting::strip_markup;
use crate::utils::path::resolve_output;
use chrono::Datelike;

pub fn handle(cmd: &Commands, store: &RecordStore) -> AppResult<()> {
    if let Commands::Timesheet {
        id,
        month,
        year,
        file,
        force,
    } = cmd
    {
        let emp = store
            .find_employee(*id)?
            .ok_or(AppError::EmployeeNotFound(*id))?;

        let now = today();
        let month = month.unwrap_or_else(|| now.month());
        let year = year.unwrap_or_else(|| now.year());

        let header = store
            .get_config(REPORT_HEADER_KEY)?
            .map(|html| strip_markup(&html))
            .unwrap_or_default();

        let sheet = Timesheet::build(&emp, year, month)?.with_header(header);

        let path = resolve_output(file.as_deref(), &sheet.file_name());
        ensure_writable(&path, *force)?;
        export_timesheet(&sheet, &path)?;
    }

    Ok(())
}
