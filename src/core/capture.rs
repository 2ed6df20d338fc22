use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::{add_frequent_laborer, insert_attendance};
use crate::errors::{AppError, AppResult};
use crate::face::FacePresence;
use crate::models::attendance::{AttendanceEvent, AttendanceSubmission, NewAttendance};
use crate::ui::messages::warning;
use chrono::{Local, NaiveDateTime, Timelike};
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

/// High-level business logic for the `capture` command.
pub struct CaptureLogic;

impl CaptureLogic {
    /// Validate a kiosk submission and record it.
    ///
    /// Checks run in this order and stop at the first failure, before the
    /// store is touched: completeness, image decoding, face presence.
    pub fn apply<D: FacePresence + ?Sized>(
        pool: &mut DbPool,
        detector: &mut D,
        submission: &AttendanceSubmission,
    ) -> AppResult<AttendanceEvent> {
        // ------------------------------------------------
        // 1️⃣ Completeness
        // ------------------------------------------------
        let missing = submission.missing_fields();
        if !missing.is_empty() {
            return Err(AppError::IncompleteSubmission(missing.join(", ")));
        }
        let photo = submission.photo.as_deref().unwrap_or_default();

        // ------------------------------------------------
        // 2️⃣ Decode
        // ------------------------------------------------
        let bitmap =
            image::load_from_memory(photo).map_err(|e| AppError::InvalidImage(e.to_string()))?;

        // ------------------------------------------------
        // 3️⃣ Face presence (single detector call)
        // ------------------------------------------------
        if !detector.has_face(&bitmap) {
            return Err(AppError::NoFaceDetected);
        }

        // ------------------------------------------------
        // 4️⃣ Persist with server-side capture time
        // ------------------------------------------------
        let name = submission.name.trim();
        let row = NewAttendance {
            name: name.to_string(),
            shift: submission.shift.trim().to_string(),
            supervisor: submission.supervisor.trim().to_string(),
            timestamp: capture_time(),
            photo: encode_jpeg(&bitmap)?,
        };

        let conn = &pool.conn;
        let id = insert_attendance(conn, &row)?;

        // ------------------------------------------------
        // 5️⃣ Bookkeeping (best effort, never undoes the insert)
        // ------------------------------------------------
        if let Err(e) = add_frequent_laborer(conn, name) {
            warning(format!(
                "Attendance saved, but '{}' could not be added to frequent laborers: {}",
                name, e
            ));
        }

        ttlog_quiet(
            conn,
            "capture",
            name,
            &format!("Attendance #{} ({} / {})", id, row.shift, row.supervisor),
        );

        Ok(AttendanceEvent {
            id,
            name: row.name,
            shift: row.shift,
            supervisor: row.supervisor,
            timestamp: row.timestamp,
            photo: Some(row.photo),
        })
    }
}

/// Local wall-clock time truncated to whole seconds (storage resolution).
fn capture_time() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

fn encode_jpeg(bitmap: &DynamicImage) -> AppResult<Vec<u8>> {
    // the JPEG encoder rejects alpha channels
    let rgb = DynamicImage::ImageRgb8(bitmap.to_rgb8());
    let mut out = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut out), ImageFormat::Jpeg)
        .map_err(|e| AppError::InvalidImage(e.to_string()))?;
    Ok(out)
}
