use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;
use ansi_term::Colour;
use regex::Regex;

const OP_WIDTH_LIMIT: usize = 60;

fn strip_ansi(s: &str) -> String {
    match Regex::new(r"\x1B\[[0-9;]*[mK]") {
        Ok(re) => re.replace_all(s, "").into_owned(),
        Err(_) => s.to_string(),
    }
}

/// Restituisce il colore ANSI in base all'operazione
fn color_for_operation(op: &str) -> Colour {
    match op {
        "capture" => Colour::Green,
        "report_sent" => Colour::Cyan,
        "report_failed" => Colour::Red,
        "report" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51), // arancione
        other if other.ends_with("_add") => Colour::Green,
        other if other.ends_with("_del") => Colour::Red,
        other if other.ends_with("_edit") => Colour::Yellow,
        _ => Colour::White,
    }
}

/// Cut `s` to `max` visible characters, ending with "..." when shortened.
fn truncate_visible(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let mut out = s.chars().take(max.saturating_sub(3)).collect::<String>();
        out.push_str("...");
        out
    } else {
        s.to_string()
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &mut DbPool) -> AppResult<()> {
        let mut stmt = pool.conn.prepare_cached(
            "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            let id: i64 = row.get(0)?;
            let raw_date: String = row.get(1)?;
            let operation: String = row.get(2)?;
            let target: String = row.get::<_, Option<String>>(3)?.unwrap_or_default();
            let message: String = row.get(4)?;

            let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(raw_date);

            Ok((id, date, operation, target, message))
        })?;

        let mut entries = Vec::new();
        for r in rows {
            entries.push(r?);
        }

        if entries.is_empty() {
            info("Internal log is empty.");
            return Ok(());
        }

        let visible_op = |op: &str, target: &str| {
            let joined = if target.is_empty() {
                op.to_string()
            } else {
                format!("{op} ({target})")
            };
            truncate_visible(&joined, OP_WIDTH_LIMIT)
        };

        let op_w = entries
            .iter()
            .map(|(_, _, op, target, _)| visible_op(op, target).chars().count())
            .max()
            .unwrap_or(10);
        let id_w = entries
            .iter()
            .map(|(id, _, _, _, _)| id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries
            .iter()
            .map(|(_, date, _, _, _)| date.len())
            .max()
            .unwrap_or(1);

        println!("📜 Internal log:\n");

        for (id, date, operation, target, message) in entries {
            let color = color_for_operation(&operation);
            let visible = visible_op(&operation, &target);

            // only the operation word is colored
            let recolored = match visible.split_once(' ') {
                Some((op_word, rest)) => format!("{} {}", color.paint(op_word), rest),
                None => color.paint(visible.as_str()).to_string(),
            };

            // padding computed without ANSI sequences
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&recolored).chars().count()));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                id,
                date,
                recolored,
                padding,
                message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
