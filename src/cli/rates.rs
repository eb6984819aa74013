use spinners_rs::{Spinner, Spinners};
use tabled::{Table, Tabled};

use crate::database::queries::currency_rate::{get_currency_rates, seed_default_rates};

#[derive(Debug, Tabled)]
struct StringifiedRate {
    code: String,
    name: String,
    rate_to_brl: String,
    last_update: String,
}

pub async fn list_rates_command() -> anyhow::Result<()> {
    let rates = get_currency_rates().await?;
    if rates.is_empty() {
        println!("No rates stored yet. Run `cambio seed` first.");
        return Ok(());
    }

    let rows: Vec<StringifiedRate> = rates
        .iter()
        .map(|rate| StringifiedRate {
            code: rate.code.clone(),
            name: rate.name.clone(),
            rate_to_brl: format!("{:.4}", rate.value),
            last_update: rate.last_update.format("%Y/%m/%d %H:%M").to_string(),
        })
        .collect();

    println!("{}", Table::new(&rows));
    Ok(())
}

pub async fn seed_command() -> anyhow::Result<()> {
    let mut sp = Spinner::new(Spinners::Point, "Seeding default currency rates...");
    sp.start();
    let inserted = seed_default_rates().await?;
    sp.stop();
    println!("\n{} new rates inserted ✅", inserted);
    Ok(())
}
