use crate::models::shift::{DEFAULT_SHIFT_END, DEFAULT_SHIFT_NAME, DEFAULT_SHIFT_START};
use crate::models::supervisor::{DEFAULT_SUPERVISOR_EMAIL, DEFAULT_SUPERVISOR_NAME};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result, params};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if a table exists.
pub(crate) fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([table], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Create every table of the kiosk schema (no-op when already present).
fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS attendance (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            shift       TEXT NOT NULL,
            supervisor  TEXT NOT NULL,
            timestamp   TEXT NOT NULL,
            image       BLOB
        );

        CREATE TABLE IF NOT EXISTS supervisors (
            id     INTEGER PRIMARY KEY AUTOINCREMENT,
            name   TEXT NOT NULL UNIQUE,
            email  TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS shifts (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            start_time  TEXT NOT NULL,
            end_time    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS labor_info (
            id                 INTEGER PRIMARY KEY AUTOINCREMENT,
            name               TEXT NOT NULL UNIQUE,
            contact            TEXT NOT NULL DEFAULT '',
            id_type            TEXT NOT NULL DEFAULT 'other'
                               CHECK(id_type IN ('national_id','tax_id','voter_id','other')),
            id_number          TEXT NOT NULL DEFAULT '',
            emergency_contact  TEXT NOT NULL DEFAULT '',
            supervisor         TEXT NOT NULL DEFAULT '',
            id_proof_image     BLOB
        );

        CREATE TABLE IF NOT EXISTS frequent_laborers (
            id    INTEGER PRIMARY KEY AUTOINCREMENT,
            name  TEXT NOT NULL UNIQUE
        );
        "#,
    )?;
    Ok(())
}

/// Insert the default supervisor and shift.
/// An existing row with the same name is left untouched.
fn seed_defaults(conn: &Connection) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO supervisors (name, email) VALUES (?1, ?2)",
        params![DEFAULT_SUPERVISOR_NAME, DEFAULT_SUPERVISOR_EMAIL],
    )?;

    // shifts.name has no UNIQUE constraint, so OR IGNORE would not help here
    conn.execute(
        "INSERT INTO shifts (name, start_time, end_time)
         SELECT ?1, ?2, ?3
         WHERE NOT EXISTS (SELECT 1 FROM shifts WHERE name = ?1)",
        params![DEFAULT_SHIFT_NAME, DEFAULT_SHIFT_START, DEFAULT_SHIFT_END],
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_migration(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        params![version, message],
    )?;
    Ok(())
}

fn migrate_add_attendance_timestamp_index(conn: &Connection) -> Result<()> {
    let version = "20261019_0001_attendance_timestamp_index";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_attendance_timestamp ON attendance(timestamp);",
    )?;

    mark_migration(conn, version, "Added timestamp index to attendance")?;

    success(format!(
        "Migration applied: {} → indexed attendance.timestamp",
        version
    ));

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invocata da db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Kiosk tables
    let fresh = !table_exists(conn, "attendance")?;
    create_tables(conn)?;
    if fresh {
        success("Created attendance schema.");
    }

    // 3) Default reference rows
    seed_defaults(conn)?;

    // 4) Versioned migrations
    migrate_add_attendance_timestamp_index(conn)?;

    Ok(())
}
