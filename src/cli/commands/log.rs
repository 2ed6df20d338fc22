use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let mut pool = super::open_db(cfg)?;
        LogLogic::print_log(&mut pool)?;
    }

    Ok(())
}
