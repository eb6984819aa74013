use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use typeshare::typeshare;

/// A materialized trip expense line: the audit record of one conversion
/// decision. `converted_amount` and `exchange_rate` are the values that
/// were computed at write time and are never recomputed on read.
#[typeshare]
#[derive(Debug, Clone, Serialize)]
pub struct ExpensePlanLine {
    pub id: String,
    pub trip_id: String,
    pub category: String,
    pub description: String,
    pub amount: Decimal,
    pub original_currency: String,
    pub target_currency: String,
    pub converted_amount: Decimal,
    pub exchange_rate: Decimal,
    pub iof_tax: Option<Decimal>,
    pub bank_fee: Option<Decimal>,
    #[typeshare(serialized_as = "string")]
    pub date: Option<NaiveDate>,
    #[typeshare(serialized_as = "string")]
    pub created_at: DateTime<Utc>,
}
