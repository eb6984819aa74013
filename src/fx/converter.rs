use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use thiserror::Error;

use crate::fx::{rate_table::RateTable, BASE_CURRENCY};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FxError {
    #[error("no exchange rate found for currency {0}")]
    UnknownCurrency(String),
    #[error("invalid stored rate {value} for currency {code}")]
    InvalidRate { code: String, value: Decimal },
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConversionRequest {
    pub amount: Decimal,
    pub from_currency: String,
    pub to_currency: String,
    pub iof_percent: Option<Decimal>,
    pub bank_fee_percent: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    /// Full precision; round only at display or persistence boundaries.
    pub converted_amount: Decimal,
    /// Price of one unit of the target currency in source-currency units,
    /// i.e. rate_to_brl(to) / rate_to_brl(from).
    pub effective_rate: Decimal,
    pub iof_amount: Option<Decimal>,
    pub bank_fee_amount: Option<Decimal>,
}

/// Converts `request.amount` from one currency to another, pivoting
/// through BRL.
///
/// IOF and bank-fee surcharges model the card fee structure of a foreign
/// purchase settled in BRL, so they apply only in that direction. Each
/// charge is a percentage of the unsurcharged BRL amount and is added to
/// the total.
///
/// The engine assumes a validated amount; negative amounts are rejected
/// at the API/CLI boundary.
pub fn convert(table: &RateTable, request: &ConversionRequest) -> Result<ConversionResult, FxError> {
    let from_rate = table.rate_to_brl(&request.from_currency)?;
    let to_rate = table.rate_to_brl(&request.to_currency)?;

    let base_brl = request.amount * from_rate;
    let mut amount_brl = base_brl;

    let mut iof_amount = None;
    let mut bank_fee_amount = None;
    if request.from_currency != BASE_CURRENCY && request.to_currency == BASE_CURRENCY {
        if let Some(iof) = request.iof_percent {
            let charge = base_brl * iof / dec!(100);
            amount_brl += charge;
            iof_amount = Some(charge);
        }
        if let Some(fee) = request.bank_fee_percent {
            let charge = base_brl * fee / dec!(100);
            amount_brl += charge;
            bank_fee_amount = Some(charge);
        }
    }

    Ok(ConversionResult {
        converted_amount: amount_brl / to_rate,
        effective_rate: if request.from_currency == request.to_currency {
            Decimal::ONE
        } else {
            to_rate / from_rate
        },
        iof_amount,
        bank_fee_amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::currency_rate::CurrencyRate;
    use chrono::Utc;

    fn table(rates: &[(&str, Decimal)]) -> RateTable {
        let rows: Vec<CurrencyRate> = rates
            .iter()
            .map(|(code, value)| CurrencyRate {
                code: code.to_string(),
                name: code.to_string(),
                value: *value,
                last_update: Utc::now(),
            })
            .collect();
        RateTable::from_rates(&rows).unwrap()
    }

    fn request(amount: Decimal, from: &str, to: &str) -> ConversionRequest {
        ConversionRequest {
            amount,
            from_currency: from.to_string(),
            to_currency: to.to_string(),
            iof_percent: None,
            bank_fee_percent: None,
        }
    }

    #[test]
    fn same_currency_is_identity() {
        let table = table(&[("USD", dec!(5.50))]);
        let result = convert(&table, &request(dec!(123.45), "USD", "USD")).unwrap();
        assert_eq!(result.converted_amount, dec!(123.45));
        assert_eq!(result.effective_rate, Decimal::ONE);

        let result = convert(&table, &request(dec!(42), "BRL", "BRL")).unwrap();
        assert_eq!(result.converted_amount, dec!(42));
    }

    #[test]
    fn brl_to_foreign_divides_by_the_rate() {
        let table = table(&[("USD", dec!(5.05))]);
        let result = convert(&table, &request(dec!(100), "BRL", "USD")).unwrap();
        assert_eq!(result.converted_amount.round_dp(2), dec!(19.80));
        assert_eq!(result.effective_rate, dec!(5.05));
    }

    #[test]
    fn foreign_to_brl_multiplies_by_the_rate() {
        let table = table(&[("EUR", dec!(5.50))]);
        let result = convert(&table, &request(dec!(100), "EUR", "BRL")).unwrap();
        assert_eq!(result.converted_amount, dec!(550.00));
        assert_eq!(result.effective_rate, Decimal::ONE / dec!(5.50));
    }

    #[test]
    fn surcharges_increase_a_foreign_to_brl_conversion() {
        let table = table(&[("EUR", dec!(5.50))]);
        let result = convert(
            &table,
            &ConversionRequest {
                iof_percent: Some(dec!(6.38)),
                bank_fee_percent: Some(dec!(4)),
                ..request(dec!(100), "EUR", "BRL")
            },
        )
        .unwrap();
        // 550.00 * 1.1038
        assert_eq!(result.converted_amount, dec!(607.09));
        assert_eq!(result.iof_amount, Some(dec!(35.09)));
        assert_eq!(result.bank_fee_amount, Some(dec!(22.00)));
    }

    #[test]
    fn surcharges_are_relative_to_the_unsurcharged_amount() {
        let table = table(&[("USD", dec!(5.00))]);
        let plain = convert(&table, &request(dec!(80), "USD", "BRL")).unwrap();
        let charged = convert(
            &table,
            &ConversionRequest {
                iof_percent: Some(dec!(6.38)),
                bank_fee_percent: Some(dec!(4)),
                ..request(dec!(80), "USD", "BRL")
            },
        )
        .unwrap();
        assert_eq!(
            charged.converted_amount,
            plain.converted_amount * (Decimal::ONE + dec!(10.38) / dec!(100))
        );
    }

    #[test]
    fn surcharges_do_not_apply_outside_foreign_to_brl() {
        let table = table(&[("USD", dec!(5.50)), ("EUR", dec!(6.20))]);
        for (from, to) in [("BRL", "USD"), ("EUR", "USD"), ("BRL", "BRL"), ("USD", "USD")] {
            let plain = convert(&table, &request(dec!(100), from, to)).unwrap();
            let charged = convert(
                &table,
                &ConversionRequest {
                    iof_percent: Some(dec!(6.38)),
                    bank_fee_percent: Some(dec!(4)),
                    ..request(dec!(100), from, to)
                },
            )
            .unwrap();
            assert_eq!(charged.converted_amount, plain.converted_amount);
            assert_eq!(charged.iof_amount, None);
            assert_eq!(charged.bank_fee_amount, None);
        }
    }

    #[test]
    fn effective_rate_is_the_ratio_of_brl_rates() {
        let table = table(&[("USD", dec!(5.50)), ("EUR", dec!(6.20))]);
        let result = convert(&table, &request(dec!(100), "EUR", "USD")).unwrap();
        assert_eq!(result.effective_rate, dec!(5.50) / dec!(6.20));
    }

    #[test]
    fn cross_rate_conversion_pivots_through_brl() {
        let table = table(&[("USD", dec!(5.50)), ("EUR", dec!(6.20))]);
        let result = convert(&table, &request(dec!(100), "EUR", "USD")).unwrap();
        assert_eq!(
            result.converted_amount,
            dec!(100) * dec!(6.20) / dec!(5.50)
        );
    }

    #[test]
    fn round_trip_recovers_the_amount_within_a_cent() {
        let table = table(&[("USD", dec!(5.50)), ("EUR", dec!(6.20))]);
        let there = convert(&table, &request(dec!(123.45), "USD", "EUR")).unwrap();
        let back = convert(&table, &request(there.converted_amount, "EUR", "USD")).unwrap();
        assert!((back.converted_amount - dec!(123.45)).abs() < dec!(0.01));
    }

    #[test]
    fn unknown_source_currency_is_an_error() {
        let table = table(&[("USD", dec!(5.50))]);
        let result = convert(&table, &request(dec!(100), "XYZ", "BRL"));
        assert_eq!(result, Err(FxError::UnknownCurrency("XYZ".to_string())));
    }

    #[test]
    fn unknown_target_currency_is_an_error() {
        let table = table(&[("USD", dec!(5.50))]);
        let result = convert(&table, &request(dec!(100), "BRL", "XYZ"));
        assert_eq!(result, Err(FxError::UnknownCurrency("XYZ".to_string())));
    }

    #[test]
    fn zero_amount_converts_to_zero() {
        let table = table(&[("USD", dec!(5.50))]);
        let result = convert(&table, &request(dec!(0), "USD", "BRL")).unwrap();
        assert_eq!(result.converted_amount, dec!(0));
    }
}
