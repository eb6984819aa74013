use std::io::{self, Write};

use num_format::{Locale, ToFormattedString};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::{fx::BASE_CURRENCY, services::shared::round_to_decimals};

pub fn confirm_action(action: &str) -> bool {
    print!("Would you like to {}? (y/n): ", action);
    io::stdout().flush().expect("Failed to flush stdout");

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .expect("Failed to read input");

    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Formats an amount the Brazilian way ("R$ 1.234,56"); other currencies
/// keep their code as prefix.
pub fn format_currency(amount: Decimal, code: &str) -> String {
    let rounded = round_to_decimals(amount);
    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    let whole = rounded.abs().trunc();
    // rounded is 2dp, so this is an exact integer in 0..=99
    let cents: i64 = ((rounded.abs() - whole) * dec!(100))
        .round()
        .to_string()
        .parse()
        .unwrap_or(0);
    // every Decimal integral part fits an i128; keep the plain digits
    // rather than a bogus zero if that ever stops holding
    let units = match whole.to_string().parse::<i128>() {
        Ok(units) => units.to_formatted_string(&Locale::pt),
        Err(_) => whole.to_string(),
    };
    let symbol = if code == BASE_CURRENCY { "R$" } else { code };
    format!("{}{} {},{:02}", sign, symbol, units, cents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_brl_with_brazilian_separators() {
        assert_eq!(format_currency(dec!(1234.5), "BRL"), "R$ 1.234,50");
        assert_eq!(format_currency(dec!(0.49), "BRL"), "R$ 0,49");
    }

    #[test]
    fn formats_foreign_currencies_with_their_code() {
        assert_eq!(format_currency(dec!(19.80198), "USD"), "USD 19,80");
        assert_eq!(format_currency(dec!(-42), "EUR"), "-EUR 42,00");
    }

    #[test]
    fn formats_amounts_beyond_the_i64_cent_range() {
        assert_eq!(
            format_currency(dec!(100000000000000000000), "BRL"),
            "R$ 100.000.000.000.000.000.000,00"
        );
    }
}
