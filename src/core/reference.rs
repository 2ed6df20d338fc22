use crate::db::laborers;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::reference as store;
use crate::errors::{AppError, AppResult};
use crate::models::id_type::IdType;
use crate::models::laborer::LaborerIdentity;
use crate::models::shift::Shift;
use crate::models::supervisor::Supervisor;
use crate::utils::time::parse_time_strict;

/// Supervisor / shift maintenance and laborer registration.
///
/// Thin layer over `db::reference` and `db::laborers`: parses user input and
/// leaves an audit line for every change.
pub struct ReferenceLogic;

impl ReferenceLogic {
    // ---------------------------
    // Supervisors
    // ---------------------------

    pub fn add_supervisor(pool: &mut DbPool, name: &str, email: &str) -> AppResult<()> {
        let name = required(name, "supervisor name")?;
        store::add_supervisor(&pool.conn, name, email.trim())?;
        ttlog_quiet(&pool.conn, "supervisor_add", name, email.trim());
        Ok(())
    }

    pub fn list_supervisors(pool: &mut DbPool) -> AppResult<Vec<Supervisor>> {
        store::list_supervisors(&pool.conn)
    }

    pub fn update_supervisor(
        pool: &mut DbPool,
        old_name: &str,
        new_name: &str,
        new_email: &str,
    ) -> AppResult<usize> {
        let new_name = required(new_name, "supervisor name")?;
        let n = store::update_supervisor(&pool.conn, old_name, new_name, new_email.trim())?;
        if n > 0 {
            ttlog_quiet(
                &pool.conn,
                "supervisor_edit",
                old_name,
                &format!("Renamed to '{}' <{}>", new_name, new_email.trim()),
            );
        }
        Ok(n)
    }

    pub fn delete_supervisor(pool: &mut DbPool, name: &str) -> AppResult<usize> {
        let n = store::delete_supervisor(&pool.conn, name)?;
        if n > 0 {
            ttlog_quiet(&pool.conn, "supervisor_del", name, "Supervisor deleted");
        }
        Ok(n)
    }

    // ---------------------------
    // Shifts
    // ---------------------------

    pub fn add_shift(pool: &mut DbPool, name: &str, start: &str, end: &str) -> AppResult<()> {
        let name = required(name, "shift name")?;
        let (s, e) = (parse_time_strict(start)?, parse_time_strict(end)?);
        store::add_shift(&pool.conn, name, s, e)?;
        ttlog_quiet(&pool.conn, "shift_add", name, &format!("{start} - {end}"));
        Ok(())
    }

    pub fn list_shifts(pool: &mut DbPool) -> AppResult<Vec<Shift>> {
        store::list_shifts(&pool.conn)
    }

    pub fn update_shift(pool: &mut DbPool, name: &str, start: &str, end: &str) -> AppResult<usize> {
        let (s, e) = (parse_time_strict(start)?, parse_time_strict(end)?);
        let n = store::update_shift(&pool.conn, name, s, e)?;
        if n > 0 {
            ttlog_quiet(&pool.conn, "shift_edit", name, &format!("{start} - {end}"));
        }
        Ok(n)
    }

    pub fn delete_shift(pool: &mut DbPool, name: &str) -> AppResult<usize> {
        let n = store::delete_shift(&pool.conn, name)?;
        if n > 0 {
            ttlog_quiet(&pool.conn, "shift_del", name, "Shift deleted");
        }
        Ok(n)
    }

    // ---------------------------
    // Laborer identities
    // ---------------------------

    /// Register a laborer. The ID proof photo is mandatory and must decode.
    #[allow(clippy::too_many_arguments)]
    pub fn register_laborer(
        pool: &mut DbPool,
        name: &str,
        contact: &str,
        id_type: IdType,
        id_number: &str,
        emergency_contact: &str,
        supervisor: &str,
        id_proof: Option<Vec<u8>>,
    ) -> AppResult<()> {
        let name = required(name, "labor name")?;

        let proof = id_proof
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AppError::IncompleteSubmission("ID proof photo".into()))?;
        image::load_from_memory(&proof).map_err(|e| AppError::InvalidImage(e.to_string()))?;

        let rec = LaborerIdentity {
            name: name.to_string(),
            contact: contact.trim().to_string(),
            id_type,
            id_number: id_number.trim().to_string(),
            emergency_contact: emergency_contact.trim().to_string(),
            supervisor: supervisor.trim().to_string(),
            id_proof: Some(proof),
        };

        laborers::add_laborer(&pool.conn, &rec)?;
        ttlog_quiet(&pool.conn, "laborer_add", name, id_type.label());
        Ok(())
    }

    /// One record when `name` is given, all records otherwise.
    pub fn list_laborers(pool: &mut DbPool, name: Option<&str>) -> AppResult<Vec<LaborerIdentity>> {
        match name {
            Some(n) => Ok(laborers::find_laborer(&pool.conn, n)?.into_iter().collect()),
            None => laborers::list_laborers(&pool.conn),
        }
    }
}

fn required<'a>(value: &'a str, what: &str) -> AppResult<&'a str> {
    let v = value.trim();
    if v.is_empty() {
        return Err(AppError::IncompleteSubmission(what.to_string()));
    }
    Ok(v)
}
