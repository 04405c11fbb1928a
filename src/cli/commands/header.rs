use crate::cli::parser::Commands;
use crate::core::store::{REPORT_HEADER_KEY, RecordStore};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use crate::utils::formatting::strip_markup;
use crate::utils::path::expand_tilde;
use std::fs;

/// Report header: stored as rich text in the `config` table.
pub fn handle(cmd: &Commands, store: &RecordStore) -> AppResult<()> {
    if let Commands::Header {
        set,
        file,
        print,
        clear,
    } = cmd
    {
        let new_value = match (set, file) {
            (Some(text), _) => Some(text.clone()),
            (None, Some(path)) => {
                let path = expand_tilde(path);
                Some(fs::read_to_string(&path).map_err(|e| {
                    AppError::Config(format!("cannot read header file {}: {e}", path.display()))
                })?)
            }
            (None, None) => None,
        };

        if let Some(value) = new_value {
            store.set_config(REPORT_HEADER_KEY, &value)?;
            success("Report header saved.");
        }

        if *clear {
            if store.delete_config(REPORT_HEADER_KEY)? {
                success("Report header removed.");
            } else {
                info("No report header set.");
            }
        }

        // print is the default action
        if *print || (set.is_none() && file.is_none() && !*clear) {
            print_header(store)?;
        }
    }

    Ok(())
}

fn print_header(store: &RecordStore) -> AppResult<()> {
    match store.get_config(REPORT_HEADER_KEY)? {
        Some(html) => {
            let lines = strip_markup(&html);
            if lines.is_empty() {
                info("Report header is set but has no text.");
            } else {
                for line in lines {
                    println!("{line}");
                }
            }
        }
        None => info("No report header set."),
    }
    Ok(())
}
