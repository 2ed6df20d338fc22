use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database with the default supervisor and shift
pub fn handle(cli: &Cli) -> AppResult<()> {
    //
    // 1️⃣ CONFIGURAZIONE
    //
    let cfg = Config::init_all(cli.db.as_deref(), cli.test)?;
    let db_path = cfg.database.clone();

    println!("⚙️  Initializing rAttendance…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database   : {}", &db_path);

    //
    // 2️⃣ APERTURA DB + TABELLE E MIGRAZIONI
    //
    let pool = DbPool::new(&db_path)?;
    init_db(&pool.conn)?;

    success(format!("Database initialized at {}", &db_path));

    //
    // 3️⃣ LOG INTERNO (non bloccante)
    //
    if let Err(e) = log::ttlog(
        &pool.conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &db_path),
    ) {
        warning(format!("Failed to write internal log: {}", e));
    }

    println!("🎉 rAttendance initialization completed!");
    Ok(())
}
