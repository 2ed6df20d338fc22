use crate::config::Config;
use crate::db::stats::daily_overview;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RESET};
use crate::utils::date::today;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let pool = super::open_db(cfg)?;
    let day = today();
    let ov = daily_overview(&pool.conn, &day)?;

    println!("📊 Dashboard for {}\n", day);
    println!("{}• Total attendance:{} {}{}{}", CYAN, RESET, GREEN, ov.total, RESET);

    println!("{}• By shift:{}", CYAN, RESET);
    for (shift, n) in &ov.by_shift {
        println!("    {:<24} {}", shift, n);
    }

    println!("{}• By supervisor:{}", CYAN, RESET);
    for (sup, n) in &ov.by_supervisor {
        println!("    {:<24} {}", sup, n);
    }

    Ok(())
}
