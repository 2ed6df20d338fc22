// src/export/mod.rs

mod excel_date;
mod thumbnail;
mod xlsx;

pub use xlsx::{
    ATTENDANCE_HEADERS, ATTENDANCE_SHEET, LABOR_HEADERS, LABOR_SHEET, ReportFile, write_report,
};

use crate::ui::messages::success;
use std::path::Path;

/// Helper comune per messaggi di completamento export.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}
