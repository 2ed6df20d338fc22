// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::excel_date::{TIMESTAMP_NUM_FORMAT, naive_datetime_to_excel_serial};
use crate::export::notify_export_success;
use crate::export::thumbnail::thumbnail_png;
use crate::models::attendance::AttendanceEvent;
use crate::models::laborer::LaborerIdentity;
use crate::ui::messages::{info, warning};
use rust_xlsxwriter::{
    Color, ColNum, Format, FormatAlign, FormatBorder, FormatPattern, Image, RowNum, Workbook,
    Worksheet,
};
use std::fs;
use std::path::{Path, PathBuf};

pub const ATTENDANCE_SHEET: &str = "Attendance Report";
pub const LABOR_SHEET: &str = "Labor Information";

pub const ATTENDANCE_HEADERS: [&str; 5] = ["Name", "Shift", "Supervisor", "Timestamp", "Photo"];
pub const LABOR_HEADERS: [&str; 7] = [
    "Name",
    "Contact",
    "ID Type",
    "ID Number",
    "Emergency Contact",
    "Supervisor",
    "ID Proof",
];

const COLUMN_WIDTH: f64 = 20.0;
/// Row height (points) fitting a 100 px thumbnail.
const PHOTO_ROW_HEIGHT: f64 = 75.0;
const HEADER_FILL: u32 = 0x366092;

/// Outcome of a report build.
#[derive(Debug, Clone)]
pub struct ReportFile {
    pub path: PathBuf,
    pub attendance_rows: usize,
    pub laborer_rows: usize,
    pub embedded_photos: usize,
}

struct Styles {
    header: Format,
    text: Format,
    timestamp: Format,
}

impl Styles {
    fn new() -> Self {
        Self {
            header: Format::new()
                .set_bold()
                .set_font_color(Color::RGB(0xFFFFFF))
                .set_background_color(Color::RGB(HEADER_FILL))
                .set_pattern(FormatPattern::Solid)
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_border(FormatBorder::Thin),
            text: Format::new().set_align(FormatAlign::VerticalCenter),
            timestamp: Format::new()
                .set_num_format(TIMESTAMP_NUM_FORMAT)
                .set_align(FormatAlign::Left)
                .set_align(FormatAlign::VerticalCenter),
        }
    }
}

/// Write the two-sheet attendance report to `path`, replacing any previous file.
///
/// The workbook is first written next to the target as `<name>.part` and then
/// renamed, so a failed build never leaves a truncated report behind.
pub fn write_report(
    events: &[AttendanceEvent],
    laborers: &[LaborerIdentity],
    path: &Path,
) -> AppResult<ReportFile> {
    info(format!("Generating report: {}", path.display()));

    let styles = Styles::new();
    let mut embedded = 0usize;

    // ---------------------------
    // Sheet 1: attendance
    // ---------------------------
    let mut attendance = Worksheet::new();
    attendance.set_name(ATTENDANCE_SHEET).map_err(to_report_error)?;
    write_headers(&mut attendance, &ATTENDANCE_HEADERS, &styles)?;

    for (i, ev) in events.iter().enumerate() {
        let row = (i + 1) as RowNum;

        write_text(&mut attendance, row, 0, &ev.name, &styles)?;
        write_text(&mut attendance, row, 1, &ev.shift, &styles)?;
        write_text(&mut attendance, row, 2, &ev.supervisor, &styles)?;
        attendance
            .write_number_with_format(
                row,
                3,
                naive_datetime_to_excel_serial(&ev.timestamp),
                &styles.timestamp,
            )
            .map_err(to_report_error)?;

        let label = format!("attendance #{} ({})", ev.id, ev.name);
        if embed_photo(&mut attendance, row, 4, ev.photo.as_deref(), &label)? {
            embedded += 1;
        }
    }

    // ---------------------------
    // Sheet 2: laborer identities
    // ---------------------------
    let mut labor = Worksheet::new();
    labor.set_name(LABOR_SHEET).map_err(to_report_error)?;
    write_headers(&mut labor, &LABOR_HEADERS, &styles)?;

    for (i, rec) in laborers.iter().enumerate() {
        let row = (i + 1) as RowNum;

        let values = [
            rec.name.as_str(),
            rec.contact.as_str(),
            rec.id_type.label(),
            rec.id_number.as_str(),
            rec.emergency_contact.as_str(),
            rec.supervisor.as_str(),
        ];
        for (col, v) in values.iter().enumerate() {
            write_text(&mut labor, row, col as ColNum, v, &styles)?;
        }

        let label = format!("ID proof of {}", rec.name);
        if embed_photo(&mut labor, row, 6, rec.id_proof.as_deref(), &label)? {
            embedded += 1;
        }
    }

    let mut workbook = Workbook::new();
    workbook.push_worksheet(attendance);
    workbook.push_worksheet(labor);

    let buffer = workbook.save_to_buffer().map_err(to_report_error)?;
    save_atomically(path, &buffer)?;

    notify_export_success("XLSX", path);

    Ok(ReportFile {
        path: path.to_path_buf(),
        attendance_rows: events.len(),
        laborer_rows: laborers.len(),
        embedded_photos: embedded,
    })
}

fn write_headers(ws: &mut Worksheet, headers: &[&str], styles: &Styles) -> AppResult<()> {
    for (col, header) in headers.iter().enumerate() {
        let col = col as ColNum;
        ws.write_with_format(0, col, *header, &styles.header)
            .map_err(to_report_error)?;
        ws.set_column_width(col, COLUMN_WIDTH)
            .map_err(to_report_error)?;
    }
    ws.set_freeze_panes(1, 0).map_err(to_report_error)?;
    Ok(())
}

fn write_text(ws: &mut Worksheet, row: RowNum, col: ColNum, s: &str, styles: &Styles) -> AppResult<()> {
    ws.write_with_format(row, col, s, &styles.text)
        .map_err(to_report_error)?;
    Ok(())
}

/// Insert the thumbnail of `blob` into the cell. Returns whether an image was placed.
/// Missing photos are left blank; undecodable ones are skipped with a warning.
fn embed_photo(
    ws: &mut Worksheet,
    row: RowNum,
    col: ColNum,
    blob: Option<&[u8]>,
    label: &str,
) -> AppResult<bool> {
    let Some(bytes) = blob.filter(|b| !b.is_empty()) else {
        return Ok(false);
    };

    let png = match thumbnail_png(bytes) {
        Ok(png) => png,
        Err(e) => {
            warning(format!("Skipping unreadable photo for {}: {}", label, e));
            return Ok(false);
        }
    };

    let image = Image::new_from_buffer(&png).map_err(to_report_error)?;
    ws.insert_image(row, col, &image).map_err(to_report_error)?;
    ws.set_row_height(row, PHOTO_ROW_HEIGHT)
        .map_err(to_report_error)?;

    Ok(true)
}

fn save_atomically(path: &Path, bytes: &[u8]) -> AppResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let mut part = path.as_os_str().to_owned();
    part.push(".part");
    let part = PathBuf::from(part);

    let result = fs::write(&part, bytes).and_then(|_| fs::rename(&part, path));
    if let Err(e) = result {
        let _ = fs::remove_file(&part);
        return Err(AppError::Report(format!(
            "cannot write {}: {}",
            path.display(),
            e
        )));
    }
    Ok(())
}

fn to_report_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Report(e.to_string())
}
