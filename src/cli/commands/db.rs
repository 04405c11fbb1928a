use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::store::RecordStore;
use crate::db::log::ttlog;
use crate::db::migrate::run_pending_migrations;
use crate::db::stats;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;
use crate::utils::colors::{CYAN, GREEN, RED, RESET};

pub fn handle(cmd: &Commands, cfg: &Config, store: &RecordStore) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info,
    } = cmd
    {
        let manager = store.manager();

        if *migrate {
            println!("{}▶ Running migrations…{}", CYAN, RESET);
            let applied = manager.with_conn(|conn| {
                run_pending_migrations(conn).map_err(|e| AppError::Migration(e.to_string()))
            })?;
            if applied > 0 {
                store.flush();
            }
            println!(
                "{}✔ Migration completed ({} step(s) applied).{}\n",
                GREEN, applied, RESET
            );
        }

        if *info {
            let db_info = manager.with_conn(|conn| stats::collect_db_info(conn))?;
            let codec = manager.codec();
            let snapshot = codec.stored_size()?;
            stats::print_db_info(
                &db_info,
                &cfg.storage_path().to_string_lossy(),
                codec.key(),
                snapshot,
            );
        }

        if *check {
            println!("{}▶ Running integrity check…{}", CYAN, RESET);

            let integrity: String = manager.with_conn(|conn| {
                Ok(conn.query_row("PRAGMA integrity_check;", [], |row| row.get(0))?)
            })?;

            if integrity == "ok" {
                println!("{}✔ Integrity check passed.{}\n", GREEN, RESET);
            } else {
                println!("{}✘ Integrity check failed:{} {}\n", RED, RESET, integrity);
            }
        }

        if *vacuum {
            println!("{}▶ Running VACUUM…{}", CYAN, RESET);

            manager.with_conn(|conn| {
                conn.execute_batch("VACUUM;")?;
                if let Err(e) = ttlog(conn, "vacuum", "main", "Database compacted") {
                    warning(format!("Failed to write internal log: {e}"));
                }
                Ok(())
            })?;
            store.flush();

            println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
        }
    }

    Ok(())
}
