//! SQLite connection pool wrapper (lightweight for CLI usage).
//! Every command and every scheduler tick opens its own connection.

use rusqlite::{Connection, Result};
use std::path::Path;
use std::time::Duration;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        // the report scheduler may write while an interactive command holds the lock
        conn.busy_timeout(Duration::from_secs(5))?;
        Ok(Self { conn })
    }
}
