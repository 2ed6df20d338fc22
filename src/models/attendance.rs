use chrono::NaiveDateTime;
use serde::Serialize;

/// Storage format of `attendance.timestamp`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Serialize)]
pub struct AttendanceEvent {
    pub id: i64,                  // ⇔ attendance.id (AUTOINCREMENT)
    pub name: String,             // ⇔ attendance.name
    pub shift: String,            // ⇔ attendance.shift
    pub supervisor: String,       // ⇔ attendance.supervisor
    pub timestamp: NaiveDateTime, // ⇔ attendance.timestamp (TEXT "YYYY-MM-DD HH:MM:SS")
    #[serde(skip)]
    pub photo: Option<Vec<u8>>, // ⇔ attendance.image (BLOB, JPEG)
}

impl AttendanceEvent {
    pub fn timestamp_str(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn time_str(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }
}

/// Row about to be written by the capture pipeline.
#[derive(Debug, Clone)]
pub struct NewAttendance {
    pub name: String,
    pub shift: String,
    pub supervisor: String,
    pub timestamp: NaiveDateTime,
    pub photo: Vec<u8>,
}

/// Raw input coming from the kiosk (UI or CLI).
#[derive(Debug, Clone, Default)]
pub struct AttendanceSubmission {
    pub name: String,
    pub shift: String,
    pub supervisor: String,
    pub photo: Option<Vec<u8>>,
}

impl AttendanceSubmission {
    pub fn new(
        name: impl Into<String>,
        shift: impl Into<String>,
        supervisor: impl Into<String>,
        photo: Option<Vec<u8>>,
    ) -> Self {
        Self {
            name: name.into(),
            shift: shift.into(),
            supervisor: supervisor.into(),
            photo,
        }
    }

    /// Names of the fields that are blank or absent, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.shift.trim().is_empty() {
            missing.push("shift");
        }
        if self.supervisor.trim().is_empty() {
            missing.push("supervisor");
        }
        if self.photo.as_ref().is_none_or(|p| p.is_empty()) {
            missing.push("photo");
        }
        missing
    }
}
