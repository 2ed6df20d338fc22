use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    else {
        return Ok(());
    };

    if !(*migrate || *check || *vacuum || *show_info) {
        info("Nothing to do: use --migrate, --check, --vacuum or --info.");
        return Ok(());
    }

    // raw connection: --check must see the file as it is
    let mut pool = DbPool::new(&cfg.database)?;

    // 1) MIGRATE
    if *migrate {
        info("Running migrations…");
        run_pending_migrations(&pool.conn)?;
        success("Migrations up to date.");
    }

    // 2) INFO
    if *show_info {
        stats::print_db_info(&mut pool, &cfg.database)?;
    }

    // 3) CHECK
    if *check {
        info("Running integrity check…");
        let problems = stats::integrity_problems(&pool.conn)?;
        if problems.is_empty() {
            success("Integrity check passed.");
        } else {
            for p in &problems {
                warning(format!("Integrity check failed: {}", p));
            }
        }
    }

    // 4) VACUUM (photo blobs leave large free pages behind)
    if *vacuum {
        let before = stats::file_size(&cfg.database);
        pool.conn.execute_batch("VACUUM;")?;
        let after = stats::file_size(&cfg.database);
        success(format!(
            "Vacuum completed: {:.2} MB → {:.2} MB",
            stats::to_mb(before),
            stats::to_mb(after)
        ));
    }

    Ok(())
}
