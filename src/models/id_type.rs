use clap::ValueEnum;
use serde::Serialize;

/// Kind of identity document attached to a laborer record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
pub enum IdType {
    NationalIdCard,
    TaxIdCard,
    VoterId,
    Other,
}

impl IdType {
    /// Human readable label (reports and listings).
    pub fn label(&self) -> &'static str {
        match self {
            IdType::NationalIdCard => "National ID Card",
            IdType::TaxIdCard => "Tax ID Card",
            IdType::VoterId => "Voter ID",
            IdType::Other => "Other",
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            IdType::NationalIdCard => "national_id",
            IdType::TaxIdCard => "tax_id",
            IdType::VoterId => "voter_id",
            IdType::Other => "other",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "national_id" => Some(IdType::NationalIdCard),
            "tax_id" => Some(IdType::TaxIdCard),
            "voter_id" => Some(IdType::VoterId),
            "other" => Some(IdType::Other),
            _ => None,
        }
    }
}
