//! staffroll main entrypoint.

use staffroll::errors::AppError;
use staffroll::run;
use staffroll::ui::messages::{error, info};

fn main() {
    println!();
    if let Err(e) = run() {
        match &e {
            AppError::DuplicateKey(reg) => {
                error(format!("Registration '{reg}' is already in use."));
                info("Use a different registration number or edit the existing employee.");
            }
            AppError::ImportDecodeFailure(_) => {
                error(&e);
                info("The file must be a valid .sqlite database (or a .zip containing one).");
            }
            _ => error(&e),
        }
        std::process::exit(1);
    }
}
