use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::store::RecordStore;
use crate::db::log;
use crate::errors::AppResult;
use crate::ui::messages::warning;

/// Handle the `init` command
///
/// Creates the config directory and file (skipped in test mode), the
/// snapshot directory, and a migrated database image saved right away.
pub fn handle(cli: &Cli, cfg: &Config, store: &RecordStore) -> AppResult<()> {
    println!("⚙️  Initializing staffroll…");

    cfg.init_all(cli.test)?;

    let manager = store.manager();
    let handle = manager.connect()?;

    let target = cfg.storage_path().to_string_lossy().to_string();
    let logged = manager.with_conn(|conn| {
        log::ttlog(
            conn,
            "init",
            &target,
            &format!("Database initialized (handle {})", handle.0),
        )
    });
    if let Err(e) = logged {
        warning(format!("Failed to write internal log: {e}"));
    }

    match manager.save_snapshot() {
        Ok(size) => println!("✅ Snapshot:    {} ({} bytes)", cfg.snapshot_key, size),
        Err(e) => warning(format!("Database ready but not saved locally: {e}")),
    }

    println!("🎉 staffroll initialization completed!");
    Ok(())
}
