use crate::cli::parser::Commands;
use crate::core::store::RecordStore;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::utils::path::resolve_output;

pub fn handle(cmd: &Commands, store: &RecordStore) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        force,
        search,
    } = cmd
    {
        let path = resolve_output(file.as_deref(), &format.default_file_name());
        ExportLogic::export(store, *format, &path, search.as_deref(), *force)?;
    }
    Ok(())
}
