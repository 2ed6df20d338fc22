//! Console messages shown to the kiosk operator.
//! Colors are dropped when `NO_COLOR` is set (e.g. output captured to a file).

use std::env;
use std::fmt;

/// ANSI colors
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLUE: &str = "\x1b[34m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

/// Icons
const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

fn use_color() -> bool {
    env::var_os("NO_COLOR").is_none_or(|v| v.is_empty())
}

fn line(color: &str, icon: &str, msg: impl fmt::Display) -> String {
    if use_color() {
        format!("{color}{BOLD}{icon} {RESET}{msg}")
    } else {
        format!("{icon} {msg}")
    }
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}", line(FG_BLUE, ICON_INFO, msg));
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}", line(FG_GREEN, ICON_OK, msg));
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}", line(FG_YELLOW, ICON_WARN, msg));
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}", line(FG_RED, ICON_ERR, msg));
}
