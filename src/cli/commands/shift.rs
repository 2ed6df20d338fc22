use crate::cli::parser::ShiftCmd;
use crate::config::Config;
use crate::core::reference::ReferenceLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &ShiftCmd, cfg: &Config) -> AppResult<()> {
    let mut pool = super::open_db(cfg)?;

    match cmd {
        ShiftCmd::Add { name, start, end } => {
            ReferenceLogic::add_shift(&mut pool, name, start, end)?;
            success(format!("Shift '{}' added ({} - {}).", name.trim(), start, end));
        }
        ShiftCmd::List => {
            let rows = ReferenceLogic::list_shifts(&mut pool)?;
            if rows.is_empty() {
                info("No shifts defined.");
                return Ok(());
            }
            let mut table = Table::new(vec![
                Column::new("Name", 24),
                Column::new("Start", 6),
                Column::new("End", 6),
            ]);
            for s in rows {
                table.add_row(vec![s.name.clone(), s.start_str(), s.end_str()]);
            }
            print!("{}", table.render());
        }
        ShiftCmd::Update { name, start, end } => {
            let n = ReferenceLogic::update_shift(&mut pool, name, start, end)?;
            if n == 0 {
                warning(format!("No shift named '{}'.", name));
            } else {
                success(format!("{} shift(s) '{}' updated.", n, name));
            }
        }
        ShiftCmd::Delete { name } => {
            let n = ReferenceLogic::delete_shift(&mut pool, name)?;
            if n == 0 {
                warning(format!("No shift named '{}'.", name));
            } else {
                success(format!("{} shift(s) '{}' deleted.", n, name));
            }
        }
    }

    Ok(())
}
