use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::dispatch::ReportMailer;
use crate::core::report::ReportLogic;
use crate::core::scheduler::ReportScheduler;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use std::io::{self, BufRead};
use std::time::Duration;

const SECS_PER_HOUR: u64 = 3600;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Schedule { interval_hours } = cmd {
        let hours = interval_hours.unwrap_or(cfg.report_interval_hours);
        if hours == 0 {
            return Err(AppError::Scheduler("interval must be at least 1 hour".into()));
        }

        // fail now rather than at the first tick
        ReportMailer::from_config(&cfg.smtp)?;

        let job_cfg = cfg.clone();
        let scheduler = ReportScheduler::start(
            Duration::from_secs(hours * SECS_PER_HOUR),
            move || {
                let report = ReportLogic::generate_and_send(&job_cfg)?;
                success(format!(
                    "Scheduled report sent ({} attendance rows)",
                    report.attendance_rows
                ));
                Ok(())
            },
        )?;

        info("Press Enter to stop the scheduler.");
        let mut line = String::new();
        // EOF counts as a stop request too
        io::stdin().lock().read_line(&mut line)?;

        scheduler.stop();
    }

    Ok(())
}
