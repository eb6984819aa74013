pub mod convert;
pub mod plans;
pub mod rates;
pub mod shared;

use clap::{Parser, Subcommand};
use convert::convert_command;
use plans::plan_command;
use rates::{list_rates_command, seed_command};
use rust_decimal::Decimal;
use shared::confirm_action;

use crate::{
    api::api,
    database::queries::currency_rate::{rates_table_is_empty, seed_default_rates},
};

#[derive(Parser, Debug)]
struct Args {
    #[clap(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the HTTP API
    Api {},
    /// Print the stored rate table
    Rates {},
    /// Insert the default currency rates
    Seed {},
    /// Convert an amount between two currencies
    Convert {
        amount: Decimal,
        from: String,
        to: String,
        #[arg(long)]
        iof: Option<Decimal>,
        #[arg(long)]
        bank_fee: Option<Decimal>,
    },
    /// Show the stored expense plan of a trip
    Plan { trip_id: String },
}

pub async fn cli() -> anyhow::Result<()> {
    let args = Args::parse();
    let args = args.cmd;
    if !matches!(args, Command::Api {} | Command::Seed {}) {
        // offer to seed a still-empty rate table before any command that reads it
        if rates_table_is_empty().await? && confirm_action("seed the default currency rates") {
            seed_default_rates().await?;
        }
    };

    match args {
        Command::Api {} => {
            println!("Starting web server...");
            api().await?;
        }
        Command::Rates {} => {
            list_rates_command().await?;
        }
        Command::Seed {} => {
            seed_command().await?;
        }
        Command::Convert {
            amount,
            from,
            to,
            iof,
            bank_fee,
        } => {
            convert_command(amount, &from, &to, iof, bank_fee).await?;
        }
        Command::Plan { trip_id } => {
            plan_command(&trip_id).await?;
        }
    }
    Ok(())
}
