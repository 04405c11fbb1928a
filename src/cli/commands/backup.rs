use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::core::store::RecordStore;
use crate::errors::AppResult;
use crate::utils::path::resolve_output;

pub fn handle(cmd: &Commands, cfg: &Config, store: &RecordStore) -> AppResult<()> {
    if let Commands::Backup {
        file,
        compress,
        force,
    } = cmd
    {
        let dest = resolve_output(file.as_deref(), &cfg.export_file_name);
        BackupLogic::export_to_file(store.manager(), &dest, *compress, *force)?;
    }

    Ok(())
}
