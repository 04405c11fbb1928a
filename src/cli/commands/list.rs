use crate::cli::parser::Commands;
use crate::core::store::RecordStore;
use crate::errors::AppResult;
use crate::models::employee::Employee;
use crate::ui::messages::header;
use crate::utils::colors::{GREY, RESET};
use crate::utils::describe_shift;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, store: &RecordStore) -> AppResult<()> {
    if let Commands::List { search } = cmd {
        let employees = match search {
            Some(term) => store.search_employees(term)?,
            None => store.list_employees()?,
        };

        if employees.is_empty() {
            match search {
                Some(term) => println!("No employees matching \"{term}\"."),
                None => println!("No employees registered yet."),
            }
            return Ok(());
        }

        match search {
            Some(term) => header(format!("Employees matching \"{term}\"")),
            None => header("Employees"),
        }
        print_table(&employees);
        println!("\n{GREY}Total: {}{RESET}", employees.len());
    }

    Ok(())
}

fn print_table(employees: &[Employee]) {
    let mut table = Table::with_headers(&["ID", "NAME", "REGISTRATION", "ROLE", "SHIFT"]);

    for emp in employees {
        let (label, _) = describe_shift(emp.shift);
        table.add_row(vec![
            emp.id.map(|id| id.to_string()).unwrap_or_default(),
            emp.name.clone(),
            emp.registration.clone(),
            emp.role.clone(),
            label.to_string(),
        ]);
    }

    print!("{}", table.render());
}
