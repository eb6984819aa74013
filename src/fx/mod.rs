pub mod converter;
pub mod rate_table;

/// Every stored rate is denominated in BRL, so all conversions pivot through it.
pub const BASE_CURRENCY: &str = "BRL";
