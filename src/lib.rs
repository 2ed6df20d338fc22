//! rAttendance library root.
//! Exposes CLI parser, high-level run() function, and internal modules so a
//! kiosk front-end can drive capture, reference data and reports directly.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod face;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Capture { .. } => cli::commands::capture::handle(&cli.command, cfg),
        Commands::Today { .. } => cli::commands::today::handle(&cli.command, cfg),
        Commands::Dashboard => cli::commands::dashboard::handle(cfg),
        Commands::Roster => cli::commands::roster::handle(cfg),
        Commands::Supervisor(cmd) => cli::commands::supervisor::handle(cmd, cfg),
        Commands::Shift(cmd) => cli::commands::shift::handle(cmd, cfg),
        Commands::Laborer(cmd) => cli::commands::laborer::handle(cmd, cfg),
        Commands::Report { .. } => cli::commands::report::handle(&cli.command, cfg),
        Commands::Schedule { .. } => cli::commands::schedule::handle(&cli.command, cfg),
    }
}

/// Entry point usato da main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ carica config UNA sola volta
    let mut cfg = Config::load()?;

    // 3️⃣ applica eventuale override del DB da riga di comando
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    // 4️⃣ passa tutto al dispatcher
    dispatch(&cli, &cfg)
}
