pub mod currency_rate;
pub mod expense_plan;
