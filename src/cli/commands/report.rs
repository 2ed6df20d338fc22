use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::dispatch::ReportMailer;
use crate::core::report::ReportLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report { file, send } = cmd {
        let path = file
            .as_deref()
            .map(expand_tilde)
            .unwrap_or_else(|| cfg.report_path());

        if *send {
            // mail settings are validated before any file is written
            let mailer = ReportMailer::from_config(&cfg.smtp)?;
            let run_cfg = Config {
                report_file: path.to_string_lossy().to_string(),
                ..cfg.clone()
            };

            let report = ReportLogic::generate_and_send_with(&run_cfg, &mailer)?;
            success(format!(
                "Report sent to {} ({} attendance rows)",
                cfg.smtp.recipient, report.attendance_rows
            ));
        } else {
            let pool = super::open_db(cfg)?;
            let report = ReportLogic::build(&pool.conn, &path)?;
            info(format!(
                "{} attendance rows, {} laborer records, {} photos embedded",
                report.attendance_rows, report.laborer_rows, report.embedded_photos
            ));
        }
    }

    Ok(())
}
