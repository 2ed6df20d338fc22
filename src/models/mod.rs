pub mod attendance;
pub mod id_type;
pub mod laborer;
pub mod shift;
pub mod supervisor;

pub use attendance::{AttendanceEvent, AttendanceSubmission, NewAttendance};
pub use id_type::IdType;
pub use laborer::LaborerIdentity;
pub use shift::Shift;
pub use supervisor::Supervisor;
