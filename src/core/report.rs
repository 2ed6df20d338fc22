use crate::config::Config;
use crate::core::dispatch::ReportMailer;
use crate::db::initialize::init_db;
use crate::db::laborers::list_laborers;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::list_attendance_all;
use crate::errors::AppResult;
use crate::export::{ReportFile, write_report};
use lettre::Transport;
use rusqlite::Connection;
use std::fmt::Display;
use std::path::Path;

/// High-level business logic for `report` and the recurring dispatcher.
pub struct ReportLogic;

impl ReportLogic {
    /// Snapshot every attendance and laborer record into the report at `path`.
    pub fn build(conn: &Connection, path: &Path) -> AppResult<ReportFile> {
        let events = list_attendance_all(conn)?;
        let laborers = list_laborers(conn)?;

        let report = write_report(&events, &laborers, path)?;

        ttlog_quiet(
            conn,
            "report",
            &path.display().to_string(),
            &format!(
                "{} attendance rows, {} laborers, {} photos",
                report.attendance_rows, report.laborer_rows, report.embedded_photos
            ),
        );
        Ok(report)
    }

    /// Build the configured report and mail it over SMTP.
    pub fn generate_and_send(cfg: &Config) -> AppResult<ReportFile> {
        let mailer = ReportMailer::from_config(&cfg.smtp)?;
        Self::generate_and_send_with(cfg, &mailer)
    }

    pub fn generate_and_send_with<T>(cfg: &Config, mailer: &ReportMailer<T>) -> AppResult<ReportFile>
    where
        T: Transport,
        T::Error: Display,
    {
        let pool = DbPool::new(&cfg.database)?;
        init_db(&pool.conn)?;
        let report = Self::build(&pool.conn, &cfg.report_path())?;
        let target = report.path.display().to_string();

        match mailer.send_report(&report) {
            Ok(()) => {
                ttlog_quiet(&pool.conn, "report_sent", &target, &cfg.smtp.recipient);
                Ok(report)
            }
            Err(e) => {
                ttlog_quiet(&pool.conn, "report_failed", &target, &e.to_string());
                Err(e)
            }
        }
    }
}
