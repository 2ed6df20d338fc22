use crate::errors::{AppError, AppResult};
use crate::models::attendance::{AttendanceEvent, NewAttendance, TIMESTAMP_FORMAT};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

/// How many of today's entries the kiosk shows next to the capture form.
pub const RECENT_ENTRIES_LIMIT: usize = 10;

pub fn map_row(row: &Row) -> Result<AttendanceEvent> {
    let ts_str: String = row.get("timestamp")?;

    let timestamp = NaiveDateTime::parse_from_str(&ts_str, TIMESTAMP_FORMAT).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Other(format!("Invalid timestamp: {}", ts_str))),
        )
    })?;

    Ok(AttendanceEvent {
        id: row.get("id")?,
        name: row.get("name")?,
        shift: row.get("shift")?,
        supervisor: row.get("supervisor")?,
        timestamp,
        photo: row.get("image")?,
    })
}

/// Append a new attendance row and return its id.
pub fn insert_attendance(conn: &Connection, ev: &NewAttendance) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO attendance (name, shift, supervisor, timestamp, image)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            ev.name,
            ev.shift,
            ev.supervisor,
            ev.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            ev.photo,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Attendance of the given day, newest first, at most `limit` rows.
pub fn list_attendance_for_day(
    conn: &Connection,
    date: &NaiveDate,
    limit: Option<usize>,
) -> AppResult<Vec<AttendanceEvent>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, shift, supervisor, timestamp, image
         FROM attendance
         WHERE timestamp LIKE ?1
         ORDER BY timestamp DESC, id DESC
         LIMIT ?2",
    )?;

    let prefix = format!("{}%", date.format("%Y-%m-%d"));
    // SQLite treats a negative LIMIT as "no limit"
    let lim: i64 = limit.map(|l| l as i64).unwrap_or(-1);

    let rows = stmt.query_map(params![prefix, lim], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// The kiosk listing: today's most recent entries.
pub fn list_attendance_today(conn: &Connection) -> AppResult<Vec<AttendanceEvent>> {
    list_attendance_for_day(
        conn,
        &crate::utils::date::today(),
        Some(RECENT_ENTRIES_LIMIT),
    )
}

/// Every attendance row, newest first (report variant, no limit).
pub fn list_attendance_all(conn: &Connection) -> AppResult<Vec<AttendanceEvent>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, shift, supervisor, timestamp, image
         FROM attendance
         ORDER BY timestamp DESC, id DESC",
    )?;

    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_attendance(conn: &Connection, id: i64) -> AppResult<Option<AttendanceEvent>> {
    let ev = conn
        .query_row(
            "SELECT id, name, shift, supervisor, timestamp, image
             FROM attendance WHERE id = ?1",
            [id],
            map_row,
        )
        .optional()?;
    Ok(ev)
}

pub fn count_attendance(conn: &Connection) -> AppResult<i64> {
    let n = conn.query_row("SELECT COUNT(*) FROM attendance", [], |row| row.get(0))?;
    Ok(n)
}

/// Insert-or-ignore into the frequent-laborer roster.
/// Returns `true` only when a new row was created.
pub fn add_frequent_laborer(conn: &Connection, name: &str) -> AppResult<bool> {
    let changed = conn.execute(
        "INSERT OR IGNORE INTO frequent_laborers (name) VALUES (?1)",
        [name],
    )?;
    Ok(changed > 0)
}

pub fn list_frequent_laborers(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM frequent_laborers ORDER BY name ASC")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
