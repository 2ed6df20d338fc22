use crate::cli::parser::LaborerCmd;
use crate::config::Config;
use crate::core::reference::ReferenceLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::colors::colorize_optional;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &LaborerCmd, cfg: &Config) -> AppResult<()> {
    let mut pool = super::open_db(cfg)?;

    match cmd {
        LaborerCmd::Add {
            name,
            contact,
            id_type,
            id_number,
            emergency,
            supervisor,
            proof,
        } => {
            let proof_bytes = super::read_photo(proof)?;
            ReferenceLogic::register_laborer(
                &mut pool,
                name,
                contact,
                *id_type,
                id_number,
                emergency,
                supervisor,
                Some(proof_bytes),
            )?;
            success(format!("Labor '{}' registered.", name.trim()));
        }
        LaborerCmd::List { name } => {
            let rows = ReferenceLogic::list_laborers(&mut pool, name.as_deref())?;
            if rows.is_empty() {
                info("No laborer records found.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::new("Name", 20),
                Column::new("Contact", 14),
                Column::new("ID Type", 16),
                Column::new("ID Number", 14),
                Column::new("Emergency", 14),
                Column::new("Supervisor", 20),
                Column::new("Proof", 5),
            ]);
            for r in rows {
                let has_proof = r.id_proof.as_ref().is_some_and(|p| !p.is_empty());
                table.add_row(vec![
                    r.name.clone(),
                    colorize_optional(&r.contact),
                    r.id_type.label().to_string(),
                    colorize_optional(&r.id_number),
                    colorize_optional(&r.emergency_contact),
                    colorize_optional(&r.supervisor),
                    if has_proof { "yes" } else { "no" }.to_string(),
                ]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}
