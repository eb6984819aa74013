use itertools::Itertools;
use rust_decimal::Decimal;
use serde::Serialize;
use typeshare::typeshare;

use crate::database::models::expense_plan::ExpensePlanLine;

#[typeshare]
#[derive(Debug, Serialize, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total_converted: Decimal,
    pub line_count: u32,
}

#[typeshare]
#[derive(Debug, Serialize)]
pub struct TripPlanSummary {
    pub trip_id: String,
    pub line_count: u32,
    pub total_converted: Decimal,
    pub categories: Vec<CategoryTotal>,
}

/// Per-category and overall totals over the stored (already converted)
/// plan lines of a trip. Sums are taken as persisted; mixing target
/// currencies within one trip is the caller's concern.
pub fn summarize_plan(trip_id: &str, lines: &[ExpensePlanLine]) -> TripPlanSummary {
    let mut categories: Vec<CategoryTotal> = lines
        .iter()
        .into_group_map_by(|line| line.category.clone())
        .into_iter()
        .map(|(category, lines)| CategoryTotal {
            category,
            total_converted: lines.iter().map(|line| line.converted_amount).sum(),
            line_count: lines.len() as u32,
        })
        .collect();
    categories.sort_by(|a, b| b.total_converted.cmp(&a.total_converted));

    TripPlanSummary {
        trip_id: trip_id.to_string(),
        line_count: lines.len() as u32,
        total_converted: lines.iter().map(|line| line.converted_amount).sum(),
        categories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn line(category: &str, converted: Decimal) -> ExpensePlanLine {
        ExpensePlanLine {
            id: format!("{}-{}", category, converted),
            trip_id: "trip-1".to_string(),
            category: category.to_string(),
            description: "test line".to_string(),
            amount: converted,
            original_currency: "BRL".to_string(),
            target_currency: "BRL".to_string(),
            converted_amount: converted,
            exchange_rate: Decimal::ONE,
            iof_tax: None,
            bank_fee: None,
            date: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_plan_sums_to_zero() {
        let summary = summarize_plan("trip-1", &[]);
        assert_eq!(summary.line_count, 0);
        assert_eq!(summary.total_converted, Decimal::ZERO);
        assert!(summary.categories.is_empty());
    }

    #[test]
    fn totals_are_grouped_by_category_largest_first() {
        let lines = vec![
            line("Lodging", dec!(800.00)),
            line("Food", dec!(120.50)),
            line("Food", dec!(89.90)),
            line("Transport", dec!(45.00)),
        ];
        let summary = summarize_plan("trip-1", &lines);

        assert_eq!(summary.line_count, 4);
        assert_eq!(summary.total_converted, dec!(1055.40));
        assert_eq!(
            summary.categories,
            vec![
                CategoryTotal {
                    category: "Lodging".to_string(),
                    total_converted: dec!(800.00),
                    line_count: 1,
                },
                CategoryTotal {
                    category: "Food".to_string(),
                    total_converted: dec!(210.40),
                    line_count: 2,
                },
                CategoryTotal {
                    category: "Transport".to_string(),
                    total_converted: dec!(45.00),
                    line_count: 1,
                },
            ]
        );
    }
}
