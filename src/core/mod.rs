pub mod capture;
pub mod dispatch;
pub mod log;
pub mod reference;
pub mod report;
pub mod scheduler;
