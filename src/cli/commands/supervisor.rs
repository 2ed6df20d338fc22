use crate::cli::parser::SupervisorCmd;
use crate::config::Config;
use crate::core::reference::ReferenceLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::utils::colors::colorize_optional;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &SupervisorCmd, cfg: &Config) -> AppResult<()> {
    let mut pool = super::open_db(cfg)?;

    match cmd {
        SupervisorCmd::Add { name, email } => {
            ReferenceLogic::add_supervisor(&mut pool, name, email)?;
            success(format!("Supervisor '{}' added.", name.trim()));
        }
        SupervisorCmd::List => {
            let rows = ReferenceLogic::list_supervisors(&mut pool)?;
            if rows.is_empty() {
                info("No supervisors defined.");
                return Ok(());
            }
            let mut table = Table::new(vec![Column::new("Name", 28), Column::new("Email", 32)]);
            for s in rows {
                table.add_row(vec![s.name, colorize_optional(&s.email)]);
            }
            print!("{}", table.render());
        }
        SupervisorCmd::Update {
            old_name,
            new_name,
            email,
        } => {
            let n = ReferenceLogic::update_supervisor(&mut pool, old_name, new_name, email)?;
            if n == 0 {
                warning(format!("No supervisor named '{}'.", old_name));
            } else {
                success(format!("Supervisor '{}' updated.", old_name));
            }
        }
        SupervisorCmd::Delete { name } => {
            let n = ReferenceLogic::delete_supervisor(&mut pool, name)?;
            if n == 0 {
                warning(format!("No supervisor named '{}'.", name));
            } else {
                success(format!("Supervisor '{}' deleted.", name));
            }
        }
    }

    Ok(())
}
