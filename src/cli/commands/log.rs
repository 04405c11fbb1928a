use crate::cli::parser::Commands;
use crate::core::log::LogLogic;
use crate::core::store::RecordStore;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, store: &RecordStore) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        LogLogic::print_log(store.manager())?;
    }

    Ok(())
}
