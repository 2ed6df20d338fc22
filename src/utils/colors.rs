/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Grey placeholder for empty cells, the value itself otherwise.
///
/// Esempio:
/// `colorize_optional("")` → "<grey>--<reset>"
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() {
        format!("{GREY}--{RESET}")
    } else {
        value.to_string()
    }
}
