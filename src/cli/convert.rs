use anyhow::bail;
use owo_colors::{OwoColorize, Style};
use rust_decimal::Decimal;
use spinners_rs::{Spinner, Spinners};

use crate::{
    cli::shared::format_currency,
    database::queries::currency_rate::get_currency_rates,
    fx::{
        converter::{convert, ConversionRequest},
        rate_table::RateTable,
    },
};

pub async fn convert_command(
    amount: Decimal,
    from: &str,
    to: &str,
    iof: Option<Decimal>,
    bank_fee: Option<Decimal>,
) -> anyhow::Result<()> {
    if amount < Decimal::ZERO {
        bail!("amount must be non-negative");
    }
    for percent in [iof, bank_fee].into_iter().flatten() {
        if percent < Decimal::ZERO {
            bail!("tax percentages must be non-negative");
        }
    }

    let mut sp = Spinner::new(Spinners::Point, "Loading the rate table...");
    sp.start();
    let rows = get_currency_rates().await?;
    sp.stop();

    let table = RateTable::from_rates(&rows)?;
    let result = convert(
        &table,
        &ConversionRequest {
            amount,
            from_currency: from.to_string(),
            to_currency: to.to_string(),
            iof_percent: iof,
            bank_fee_percent: bank_fee,
        },
    )?;

    println!("\n");
    println!("Initial value: {}", format_currency(amount, from));
    println!(
        "Exchange rate: 1 {} = {:.4} {}",
        to, result.effective_rate, from
    );
    if let Some(charge) = result.iof_amount {
        println!("IOF ({}%): {}", iof.unwrap_or_default(), format_currency(charge, to));
    }
    if let Some(charge) = result.bank_fee_amount {
        println!(
            "Bank fee ({}%): {}",
            bank_fee.unwrap_or_default(),
            format_currency(charge, to)
        );
    }
    println!("====");
    let converted_cli_style = Style::new().black().on_white().bold();
    println!(
        "Converted value: {}",
        format_currency(result.converted_amount, to).style(converted_cli_style)
    );
    Ok(())
}
