use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::capture::CaptureLogic;
use crate::errors::AppResult;
use crate::face::ScrfdDetector;
use crate::models::attendance::AttendanceSubmission;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Capture {
        name,
        shift,
        supervisor,
        photo,
    } = cmd
    {
        // 1️⃣ model first: without it no capture can be validated
        let model = cfg.face_model_path();
        let mut detector = ScrfdDetector::load(&model.to_string_lossy())?;

        // 2️⃣ submission
        let bytes = super::read_photo(photo)?;
        let submission = AttendanceSubmission::new(name, shift, supervisor, Some(bytes));

        // 3️⃣ validate + persist
        let mut pool = super::open_db(cfg)?;
        let event = CaptureLogic::apply(&mut pool, &mut detector, &submission)?;

        success(format!(
            "Attendance captured for {} at {} (#{})",
            event.name,
            event.timestamp_str(),
            event.id
        ));
    }

    Ok(())
}
