use chrono::NaiveTime;
use serde::Serialize;

pub const DEFAULT_SHIFT_NAME: &str = "Morning Shift";
pub const DEFAULT_SHIFT_START: &str = "09:00";
pub const DEFAULT_SHIFT_END: &str = "17:00";

/// Storage format of `shifts.start_time` / `shifts.end_time`.
pub const SHIFT_TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shift {
    pub name: String,          // ⇔ shifts.name (not unique)
    pub start_time: NaiveTime, // ⇔ shifts.start_time (TEXT "HH:MM")
    pub end_time: NaiveTime,   // ⇔ shifts.end_time (TEXT "HH:MM")
}

impl Shift {
    pub fn start_str(&self) -> String {
        self.start_time.format(SHIFT_TIME_FORMAT).to_string()
    }

    pub fn end_str(&self) -> String {
        self.end_time.format(SHIFT_TIME_FORMAT).to_string()
    }
}
