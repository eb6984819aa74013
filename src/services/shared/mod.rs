pub mod env;
pub mod logger;

use rust_decimal::Decimal;

pub fn hash_string(input_string: &str) -> String {
    blake3::hash(input_string.as_bytes()).to_string()
}

pub fn round_to_decimals(input: Decimal) -> Decimal {
    input.round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rounds_to_two_decimal_places() {
        assert_eq!(round_to_decimals(dec!(19.80198)), dec!(19.80));
        assert_eq!(round_to_decimals(dec!(607.090)), dec!(607.09));
    }

    #[test]
    fn hashing_is_stable() {
        assert_eq!(hash_string("trip-1"), hash_string("trip-1"));
        assert_ne!(hash_string("trip-1"), hash_string("trip-2"));
    }
}
