use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tokio_postgres::Row;

use crate::database::{db_client, models::currency_rate::CurrencyRate};

/// The original nine-currency table the app ships with; `cambio seed`
/// inserts these for codes not already present.
pub fn default_rates() -> Vec<(&'static str, &'static str, Decimal)> {
    vec![
        ("USD", "US Dollar", dec!(5.50)),
        ("EUR", "Euro", dec!(6.20)),
        ("GBP", "British Pound", dec!(7.30)),
        ("JPY", "Japanese Yen", dec!(0.049)),
        ("AUD", "Australian Dollar", dec!(3.85)),
        ("CAD", "Canadian Dollar", dec!(4.05)),
        ("CHF", "Swiss Franc", dec!(6.45)),
        ("CNY", "Chinese Yuan", dec!(0.84)),
        ("ARS", "Argentine Peso", dec!(0.063)),
    ]
}

fn row_to_rate(row: &Row) -> CurrencyRate {
    CurrencyRate {
        code: row.get("code"),
        name: row.get("name"),
        value: row.get("value"),
        last_update: row.get("last_update"),
    }
}

pub async fn get_currency_rates() -> anyhow::Result<Vec<CurrencyRate>> {
    let client = db_client().await?;

    let rows = client
        .query(
            "SELECT code, name, value, last_update FROM currency_rates ORDER BY code",
            &[],
        )
        .await?;

    Ok(rows.iter().map(row_to_rate).collect())
}

pub async fn get_currency_rate(code: &str) -> anyhow::Result<Option<CurrencyRate>> {
    let client = db_client().await?;

    let row = client
        .query_opt(
            "SELECT code, name, value, last_update FROM currency_rates WHERE code = $1",
            &[&code],
        )
        .await?;

    Ok(row.as_ref().map(row_to_rate))
}

/// Updates a rate in place, refreshing `last_update`. Returns the updated
/// row, or `None` when the code is not in the table.
pub async fn update_currency_rate(
    code: &str,
    value: Decimal,
    name: Option<&str>,
) -> anyhow::Result<Option<CurrencyRate>> {
    let client = db_client().await?;

    let row = client
        .query_opt(
            "UPDATE currency_rates SET value = $2, name = COALESCE($3, name), last_update = NOW() \
             WHERE code = $1 RETURNING code, name, value, last_update",
            &[&code, &value, &name],
        )
        .await?;

    Ok(row.as_ref().map(row_to_rate))
}

pub async fn seed_default_rates() -> anyhow::Result<u64> {
    let client = db_client().await?;

    let mut inserted = 0;
    for (code, name, value) in default_rates() {
        inserted += client
            .execute(
                "INSERT INTO currency_rates (code, name, value, last_update) \
                 VALUES ($1, $2, $3, NOW()) ON CONFLICT(code) DO NOTHING",
                &[&code, &name, &value],
            )
            .await?;
    }

    Ok(inserted)
}

pub async fn rates_table_is_empty() -> anyhow::Result<bool> {
    let client = db_client().await?;

    let row = client
        .query_one("SELECT COUNT(*) FROM currency_rates", &[])
        .await?;
    let count: i64 = row.get(0);
    Ok(count == 0)
}
