use crate::cli::parser::Commands;
use crate::core::store::RecordStore;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};

/// Update the given fields of an employee; the others are kept.
pub fn handle(cmd: &Commands, store: &RecordStore) -> AppResult<()> {
    if let Commands::Edit {
        id,
        name,
        registration,
        role,
        shift,
    } = cmd
    {
        let mut emp = store
            .find_employee(*id)?
            .ok_or(AppError::EmployeeNotFound(*id))?;

        if name.is_none() && registration.is_none() && role.is_none() && shift.is_none() {
            info("Nothing to update.");
            return Ok(());
        }

        if let Some(v) = name {
            emp.name = v.clone();
        }
        if let Some(v) = registration {
            emp.registration = v.clone();
        }
        if let Some(v) = role {
            emp.role = v.clone();
        }
        if let Some(v) = shift {
            emp.shift = *v;
        }

        store.update_employee(&emp)?;
        success(format!("Employee #{} updated.", id));
    }

    Ok(())
}
