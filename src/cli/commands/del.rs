use crate::cli::parser::Commands;
use crate::core::store::RecordStore;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, store: &RecordStore) -> AppResult<()> {
    if let Commands::Del { id, force } = cmd {
        let label = match store.find_employee(*id)? {
            Some(emp) => format!("#{} {} ({})", id, emp.name, emp.registration),
            None => {
                info(format!("No employee with id {id}."));
                return Ok(());
            }
        };

        if !*force
            && !ask_confirmation(&format!(
                "Delete employee {label}? This action is irreversible."
            ))
        {
            info("Operation cancelled.");
            return Ok(());
        }

        if store.delete_employee(*id)? {
            success(format!("Employee {label} has been deleted."));
        } else {
            info(format!("No employee with id {id}."));
        }
    }

    Ok(())
}
