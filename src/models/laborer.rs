use super::id_type::IdType;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct LaborerIdentity {
    pub name: String, // ⇔ labor_info.name (UNIQUE)
    pub contact: String,
    pub id_type: IdType, // ⇔ labor_info.id_type (db code)
    pub id_number: String,
    pub emergency_contact: String,
    pub supervisor: String,
    #[serde(skip)]
    pub id_proof: Option<Vec<u8>>, // ⇔ labor_info.id_proof_image (BLOB)
}
