//! staffroll library root.
//! Exposes the CLI parser, the high-level run() function and the internal
//! modules (connection manager, record store, snapshot codec, exports).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod storage;
pub mod ui;
pub mod utils;

use clap::Parser;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::store::RecordStore;
use crate::db::connection::ConnectionManager;
use crate::errors::AppResult;
use std::sync::Arc;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, store: &RecordStore) -> AppResult<()> {
    use crate::cli::commands as cmd;

    match &cli.command {
        Commands::Init => cmd::init::handle(cli, cfg, store),
        Commands::Config { .. } => cmd::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cmd::db::handle(&cli.command, cfg, store),
        Commands::Log { .. } => cmd::log::handle(&cli.command, store),
        Commands::Add { .. } => cmd::add::handle(&cli.command, store),
        Commands::Edit { .. } => cmd::edit::handle(&cli.command, store),
        Commands::Del { .. } => cmd::del::handle(&cli.command, store),
        Commands::List { .. } => cmd::list::handle(&cli.command, store),
        Commands::Header { .. } => cmd::header::handle(&cli.command, store),
        Commands::Backup { .. } => cmd::backup::handle(&cli.command, cfg, store),
        Commands::Import { .. } => cmd::import::handle(&cli.command, store),
        Commands::Export { .. } => cmd::export::handle(&cli.command, store),
        Commands::Timesheet { .. } => cmd::timesheet::handle(&cli.command, store),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // config is loaded once and shared by every command
    let mut cfg = Config::load()?;

    if let Some(dir) = &cli.store {
        cfg.storage_dir = dir.clone();
    }

    // nothing touches the engine until a command asks for the handle
    let manager = Arc::new(ConnectionManager::open(&cfg));
    let store = RecordStore::new(manager, cfg.write_policy);

    dispatch(&cli, &cfg, &store)
}
