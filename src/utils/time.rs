//! Time utilities: parsing HH:MM shift bounds.

use crate::errors::{AppError, AppResult};
use crate::models::shift::SHIFT_TIME_FORMAT;
use chrono::NaiveTime;

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), SHIFT_TIME_FORMAT).ok()
}

/// Like `parse_time`, but reports the offending input.
pub fn parse_time_strict(t: &str) -> AppResult<NaiveTime> {
    parse_time(t).ok_or_else(|| AppError::InvalidTime(t.to_string()))
}
