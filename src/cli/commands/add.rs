use crate::cli::parser::Commands;
use crate::core::store::RecordStore;
use crate::errors::AppResult;
use crate::models::employee::Employee;
use crate::ui::messages::success;
use crate::utils::colors::RESET;
use crate::utils::describe_shift;

/// Register a new employee.
pub fn handle(cmd: &Commands, store: &RecordStore) -> AppResult<()> {
    if let Commands::Add {
        name,
        registration,
        role,
        shift,
    } = cmd
    {
        let emp = Employee::new(name, registration, role, *shift);
        let id = store.add_employee(&emp)?;

        let (label, color) = describe_shift(emp.shift);
        success(format!(
            "Employee #{} {} ({}) added, shift {}{}{}.",
            id,
            emp.name.trim(),
            emp.registration.trim(),
            color,
            label,
            RESET
        ));
    }

    Ok(())
}
