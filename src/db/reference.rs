//! Supervisor and shift tables.

use crate::errors::{AppError, AppResult};
use crate::models::shift::{SHIFT_TIME_FORMAT, Shift};
use crate::models::supervisor::Supervisor;
use chrono::NaiveTime;
use rusqlite::{Connection, Result, Row, params};

// ---------------------------
// Supervisors
// ---------------------------

pub fn add_supervisor(conn: &Connection, name: &str, email: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO supervisors (name, email) VALUES (?1, ?2)",
        params![name, email],
    )
    .map_err(|e| AppError::from_insert(e, format!("Supervisor '{}'", name)))?;
    Ok(())
}

pub fn list_supervisors(conn: &Connection) -> AppResult<Vec<Supervisor>> {
    let mut stmt = conn.prepare("SELECT name, email FROM supervisors ORDER BY id ASC")?;
    let rows = stmt.query_map([], |row| {
        Ok(Supervisor {
            name: row.get(0)?,
            email: row.get(1)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Returns the number of deleted rows (0 or 1).
pub fn delete_supervisor(conn: &Connection, name: &str) -> AppResult<usize> {
    let n = conn.execute("DELETE FROM supervisors WHERE name = ?1", [name])?;
    Ok(n)
}

/// Rename in place. Attendance and laborer rows keep the old label.
pub fn update_supervisor(
    conn: &Connection,
    old_name: &str,
    new_name: &str,
    new_email: &str,
) -> AppResult<usize> {
    let n = conn
        .execute(
            "UPDATE supervisors SET name = ?1, email = ?2 WHERE name = ?3",
            params![new_name, new_email, old_name],
        )
        .map_err(|e| AppError::from_insert(e, format!("Supervisor '{}'", new_name)))?;
    Ok(n)
}

// ---------------------------
// Shifts
// ---------------------------

fn parse_shift_time(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, SHIFT_TIME_FORMAT).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidTime(s.to_string())),
        )
    })
}

fn map_shift(row: &Row) -> Result<Shift> {
    let start: String = row.get("start_time")?;
    let end: String = row.get("end_time")?;

    Ok(Shift {
        name: row.get("name")?,
        start_time: parse_shift_time(&start)?,
        end_time: parse_shift_time(&end)?,
    })
}

pub fn add_shift(conn: &Connection, name: &str, start: NaiveTime, end: NaiveTime) -> AppResult<()> {
    conn.execute(
        "INSERT INTO shifts (name, start_time, end_time) VALUES (?1, ?2, ?3)",
        params![
            name,
            start.format(SHIFT_TIME_FORMAT).to_string(),
            end.format(SHIFT_TIME_FORMAT).to_string(),
        ],
    )?;
    Ok(())
}

pub fn list_shifts(conn: &Connection) -> AppResult<Vec<Shift>> {
    let mut stmt = conn.prepare("SELECT name, start_time, end_time FROM shifts ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_shift)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Deletes every shift carrying `name`.
pub fn delete_shift(conn: &Connection, name: &str) -> AppResult<usize> {
    let n = conn.execute("DELETE FROM shifts WHERE name = ?1", [name])?;
    Ok(n)
}

/// Updates the hours of every shift carrying `name`.
pub fn update_shift(
    conn: &Connection,
    name: &str,
    start: NaiveTime,
    end: NaiveTime,
) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE shifts SET start_time = ?1, end_time = ?2 WHERE name = ?3",
        params![
            start.format(SHIFT_TIME_FORMAT).to_string(),
            end.format(SHIFT_TIME_FORMAT).to_string(),
            name,
        ],
    )?;
    Ok(n)
}
