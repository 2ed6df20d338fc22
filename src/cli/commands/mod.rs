pub mod capture;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod init;
pub mod laborer;
pub mod log;
pub mod report;
pub mod roster;
pub mod schedule;
pub mod shift;
pub mod supervisor;
pub mod today;

use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use std::fs;
use std::path::Path;

/// Open the configured database, creating missing tables on the way.
pub(crate) fn open_db(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    Ok(pool)
}

/// Read a photo file given on the command line.
pub(crate) fn read_photo(path: &str) -> AppResult<Vec<u8>> {
    fs::read(Path::new(path))
        .map_err(|e| AppError::InvalidImage(format!("cannot read {}: {}", path, e)))
}
