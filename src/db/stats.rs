use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension};
use std::fs;

/// Attendance counts for one day, as shown on the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyOverview {
    pub total: i64,
    pub by_shift: Vec<(String, i64)>,
    pub by_supervisor: Vec<(String, i64)>,
}

fn grouped_counts(conn: &Connection, column: &str, prefix: &str) -> AppResult<Vec<(String, i64)>> {
    // `column` is one of two fixed identifiers, never user input
    let sql = format!(
        "SELECT {column}, COUNT(*) FROM attendance
         WHERE timestamp LIKE ?1
         GROUP BY {column}
         ORDER BY COUNT(*) DESC, {column} ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([prefix], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn daily_overview(conn: &Connection, date: &NaiveDate) -> AppResult<DailyOverview> {
    let prefix = format!("{}%", date.format("%Y-%m-%d"));

    let total: i64 = conn.query_row(
        "SELECT COUNT(*) FROM attendance WHERE timestamp LIKE ?1",
        [&prefix],
        |row| row.get(0),
    )?;

    Ok(DailyOverview {
        total,
        by_shift: grouped_counts(conn, "shift", &prefix)?,
        by_supervisor: grouped_counts(conn, "supervisor", &prefix)?,
    })
}

/// Size of the database file in bytes, 0 when it cannot be read.
pub fn file_size(db_path: &str) -> u64 {
    fs::metadata(db_path).map(|m| m.len()).unwrap_or(0)
}

pub fn to_mb(bytes: u64) -> f64 {
    (bytes as f64) / (1024.0 * 1024.0)
}

/// Rows reported by `PRAGMA integrity_check`, empty when the file is healthy.
pub fn integrity_problems(conn: &Connection) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare("PRAGMA integrity_check;")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        let line = r?;
        if line != "ok" {
            out.push(line);
        }
    }
    Ok(out)
}

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_mb = to_mb(file_size(db_path));

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROW COUNTS
    //
    for (label, table) in [
        ("Attendance records", "attendance"),
        ("Supervisors", "supervisors"),
        ("Shifts", "shifts"),
        ("Laborer records", "labor_info"),
        ("Frequent laborers", "frequent_laborers"),
    ] {
        let count: i64 = pool
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
        println!("{}• {}:{} {}{}{}", CYAN, label, RESET, GREEN, count, RESET);
    }

    //
    // 3) DATE RANGE
    //
    let first: Option<String> = pool
        .conn
        .query_row(
            "SELECT timestamp FROM attendance ORDER BY timestamp ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last: Option<String> = pool
        .conn
        .query_row(
            "SELECT timestamp FROM attendance ORDER BY timestamp DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    println!("{}• Attendance range:{}", CYAN, RESET);
    println!(
        "    from: {}",
        first.unwrap_or_else(|| format!("{GREY}--{RESET}"))
    );
    println!(
        "    to:   {}",
        last.unwrap_or_else(|| format!("{GREY}--{RESET}"))
    );

    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrate::run_pending_migrations;
    use rusqlite::params;

    #[test]
    fn test_daily_overview_groups_only_that_day() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();

        for (name, shift, sup, ts) in [
            ("A", "Morning Shift", "Ravi", "2026-03-02 08:00:00"),
            ("B", "Morning Shift", "Meena", "2026-03-02 08:10:00"),
            ("C", "Night", "Ravi", "2026-03-02 21:00:00"),
            ("D", "Night", "Ravi", "2026-03-01 21:00:00"),
        ] {
            conn.execute(
                "INSERT INTO attendance (name, shift, supervisor, timestamp) VALUES (?1, ?2, ?3, ?4)",
                params![name, shift, sup, ts],
            )
            .unwrap();
        }

        let day = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let ov = daily_overview(&conn, &day).unwrap();
        assert_eq!(ov.total, 3);
        assert_eq!(
            ov.by_shift,
            vec![("Morning Shift".to_string(), 2), ("Night".to_string(), 1)]
        );
        assert_eq!(
            ov.by_supervisor,
            vec![("Ravi".to_string(), 2), ("Meena".to_string(), 1)]
        );
    }

    #[test]
    fn test_fresh_db_has_no_integrity_problems() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        assert!(integrity_problems(&conn).unwrap().is_empty());
        assert_eq!(file_size("/nonexistent/rattendance.sqlite"), 0);
    }
}
