use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::database::models::currency_rate::CurrencyRate;
use crate::fx::{converter::FxError, BASE_CURRENCY};

/// Immutable snapshot of the BRL-denominated rate table.
///
/// A conversion reads one snapshot for all of its lookups, so a table
/// refresh happening concurrently can never mix stale and fresh rates
/// within a single computation.
#[derive(Debug, Clone)]
pub struct RateTable {
    rates: HashMap<String, Decimal>,
}

impl RateTable {
    /// Builds a snapshot from the persisted rate rows. A non-positive
    /// stored rate is a data-integrity fault in the rate source and
    /// rejects the whole snapshot.
    pub fn from_rates(rows: &[CurrencyRate]) -> Result<Self, FxError> {
        let mut rates = HashMap::new();
        for row in rows {
            // BRL is the pivot and is never stored; ignore it if present.
            if row.code == BASE_CURRENCY {
                continue;
            }
            if row.value <= Decimal::ZERO {
                return Err(FxError::InvalidRate {
                    code: row.code.clone(),
                    value: row.value,
                });
            }
            rates.insert(row.code.clone(), row.value);
        }
        Ok(RateTable { rates })
    }

    /// BRL units per one unit of `code`. BRL itself is always 1.
    ///
    /// An absent code is an error rather than a silent `1.0` fallback:
    /// a typo'd or unsupported code must not be priced at parity.
    pub fn rate_to_brl(&self, code: &str) -> Result<Decimal, FxError> {
        if code == BASE_CURRENCY {
            return Ok(Decimal::ONE);
        }
        self.rates
            .get(code)
            .copied()
            .ok_or_else(|| FxError::UnknownCurrency(code.to_string()))
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn rate(code: &str, value: Decimal) -> CurrencyRate {
        CurrencyRate {
            code: code.to_string(),
            name: code.to_string(),
            value,
            last_update: Utc::now(),
        }
    }

    #[test]
    fn brl_is_implicit() {
        let table = RateTable::from_rates(&[rate("USD", dec!(5.50))]).unwrap();
        assert_eq!(table.rate_to_brl("BRL").unwrap(), Decimal::ONE);
    }

    #[test]
    fn stored_brl_row_is_ignored() {
        let table =
            RateTable::from_rates(&[rate("BRL", dec!(2.0)), rate("USD", dec!(5.50))]).unwrap();
        assert_eq!(table.rate_to_brl("BRL").unwrap(), Decimal::ONE);
    }

    #[test]
    fn unknown_code_is_an_error() {
        let table = RateTable::from_rates(&[rate("USD", dec!(5.50))]).unwrap();
        assert_eq!(
            table.rate_to_brl("XYZ"),
            Err(FxError::UnknownCurrency("XYZ".to_string()))
        );
    }

    #[test]
    fn zero_rate_rejects_the_snapshot() {
        let result = RateTable::from_rates(&[rate("USD", dec!(5.50)), rate("JPY", dec!(0))]);
        assert_eq!(
            result.unwrap_err(),
            FxError::InvalidRate {
                code: "JPY".to_string(),
                value: dec!(0),
            }
        );
    }

    #[test]
    fn negative_rate_rejects_the_snapshot() {
        let result = RateTable::from_rates(&[rate("USD", dec!(-1))]);
        assert!(matches!(result, Err(FxError::InvalidRate { .. })));
    }
}
