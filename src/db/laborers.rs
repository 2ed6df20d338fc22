//! Laborer identity records (`labor_info`).

use crate::errors::{AppError, AppResult};
use crate::models::id_type::IdType;
use crate::models::laborer::LaborerIdentity;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_laborer(row: &Row) -> Result<LaborerIdentity> {
    let id_type_str: String = row.get("id_type")?;
    let id_type = IdType::from_db_str(&id_type_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidIdType(id_type_str.clone())),
        )
    })?;

    Ok(LaborerIdentity {
        name: row.get("name")?,
        contact: row.get("contact")?,
        id_type,
        id_number: row.get("id_number")?,
        emergency_contact: row.get("emergency_contact")?,
        supervisor: row.get("supervisor")?,
        id_proof: row.get("id_proof_image")?,
    })
}

pub fn add_laborer(conn: &Connection, rec: &LaborerIdentity) -> AppResult<()> {
    conn.execute(
        "INSERT INTO labor_info
            (name, contact, id_type, id_number, emergency_contact, supervisor, id_proof_image)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            rec.name,
            rec.contact,
            rec.id_type.to_db_str(),
            rec.id_number,
            rec.emergency_contact,
            rec.supervisor,
            rec.id_proof,
        ],
    )
    .map_err(|e| AppError::from_insert(e, format!("Labor '{}'", rec.name)))?;
    Ok(())
}

pub fn find_laborer(conn: &Connection, name: &str) -> AppResult<Option<LaborerIdentity>> {
    let rec = conn
        .query_row(
            "SELECT name, contact, id_type, id_number, emergency_contact, supervisor, id_proof_image
             FROM labor_info WHERE name = ?1",
            [name],
            map_laborer,
        )
        .optional()?;
    Ok(rec)
}

pub fn list_laborers(conn: &Connection) -> AppResult<Vec<LaborerIdentity>> {
    let mut stmt = conn.prepare(
        "SELECT name, contact, id_type, id_number, emergency_contact, supervisor, id_proof_image
         FROM labor_info ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], map_laborer)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
