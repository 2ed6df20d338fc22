use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Initialize the database.
///
/// Switches the file to WAL so the report scheduler can read while the kiosk
/// writes, then delegates schema and default rows to the migration engine.
/// Safe to call on every start.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    // in-memory databases answer "memory" and stay as they are
    let _mode: String =
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;

    run_pending_migrations(conn)?;
    Ok(())
}
