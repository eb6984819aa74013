use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use typeshare::typeshare;

/// One row of the persisted rate table: how many BRL one unit of the
/// currency is worth.
#[typeshare]
#[derive(Debug, Clone, Serialize)]
pub struct CurrencyRate {
    pub code: String,
    pub name: String,
    pub value: Decimal,
    #[typeshare(serialized_as = "string")]
    pub last_update: DateTime<Utc>,
}
