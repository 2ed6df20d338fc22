use crate::config::Config;
use crate::db::queries::list_frequent_laborers;
use crate::errors::AppResult;
use crate::ui::messages::info;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let pool = super::open_db(cfg)?;
    let names = list_frequent_laborers(&pool.conn)?;

    if names.is_empty() {
        info("No frequent laborers yet.");
        return Ok(());
    }

    println!("👷 Frequent laborers ({}):\n", names.len());
    for n in names {
        println!("  • {}", n);
    }
    Ok(())
}
