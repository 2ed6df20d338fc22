use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::queries::{RECENT_ENTRIES_LIMIT, list_attendance_for_day};
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::date::today;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Today { all } = cmd {
        let pool = super::open_db(cfg)?;
        let day = today();
        let limit = if *all { None } else { Some(RECENT_ENTRIES_LIMIT) };

        let events = list_attendance_for_day(&pool.conn, &day, limit)?;
        if events.is_empty() {
            info(format!("No attendance recorded on {}", day));
            return Ok(());
        }

        println!("📋 Attendance of {} (newest first):\n", day);

        let mut table = Table::new(vec![
            Column::new("Time", 8),
            Column::new("Name", 24),
            Column::new("Shift", 16),
            Column::new("Supervisor", 20),
        ]);
        for ev in &events {
            table.add_row(vec![
                ev.time_str(),
                ev.name.clone(),
                ev.shift.clone(),
                ev.supervisor.clone(),
            ]);
        }
        print!("{}", table.render());
    }

    Ok(())
}
