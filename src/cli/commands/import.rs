use crate::cli::parser::Commands;
use crate::core::backup::BackupLogic;
use crate::core::store::RecordStore;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, store: &RecordStore) -> AppResult<()> {
    if let Commands::Import { file } = cmd {
        let src = expand_tilde(file);
        BackupLogic::import_from_file(store.manager(), &src)?;

        let total = store.count_employees()?;
        success(format!("Database imported: {total} employee(s) loaded."));
    }

    Ok(())
}
