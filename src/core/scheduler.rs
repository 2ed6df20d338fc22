use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// One recurring dispatcher per process.
static RUNNING: AtomicBool = AtomicBool::new(false);

/// Background thread running a job every `interval`.
///
/// The first run happens one interval after `start`. A failing job is reported
/// and the loop waits for the next tick. Dropping the handle stops the thread.
pub struct ReportScheduler {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ReportScheduler {
    pub fn start<F>(interval: Duration, mut job: F) -> AppResult<Self>
    where
        F: FnMut() -> AppResult<()> + Send + 'static,
    {
        if interval.is_zero() {
            return Err(AppError::Scheduler("interval must be greater than zero".into()));
        }

        if RUNNING
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(AppError::Scheduler("report scheduler already running".into()));
        }

        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let spawned = thread::Builder::new()
            .name("report-scheduler".into())
            .spawn(move || {
                loop {
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {
                            if let Err(e) = job() {
                                error(format!("Scheduled report failed: {}", e));
                            }
                        }
                        // stop requested or handle dropped
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            });

        match spawned {
            Ok(handle) => {
                info(format!(
                    "Report scheduler started (every {})",
                    describe_interval(interval)
                ));
                Ok(Self {
                    stop_tx: Some(stop_tx),
                    handle: Some(handle),
                })
            }
            Err(e) => {
                RUNNING.store(false, Ordering::SeqCst);
                Err(AppError::Scheduler(e.to_string()))
            }
        }
    }

    pub fn is_running() -> bool {
        RUNNING.load(Ordering::SeqCst)
    }

    /// Stop and wait for an in-flight job to finish.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error("Report scheduler thread panicked");
            }
            RUNNING.store(false, Ordering::SeqCst);
            info("Report scheduler stopped");
        }
    }
}

impl Drop for ReportScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn describe_interval(d: Duration) -> String {
    let secs = d.as_secs();
    if secs >= 3600 && secs % 3600 == 0 {
        format!("{}h", secs / 3600)
    } else if secs >= 60 && secs % 60 == 0 {
        format!("{}m", secs / 60)
    } else {
        format!("{}ms", d.as_millis())
    }
}
