use serde::Serialize;

pub const DEFAULT_SUPERVISOR_NAME: &str = "Default Supervisor";
pub const DEFAULT_SUPERVISOR_EMAIL: &str = "supervisor@example.com";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Supervisor {
    pub name: String,  // ⇔ supervisors.name (UNIQUE)
    pub email: String, // ⇔ supervisors.email
}
