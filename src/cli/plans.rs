use owo_colors::{OwoColorize, Style};
use tabled::{Table, Tabled};

use crate::{
    cli::shared::format_currency,
    database::queries::expense_plan::get_plan_lines,
    services::planning::summarize_plan,
};

#[derive(Debug, Tabled)]
struct StringifiedPlanLine {
    category: String,
    description: String,
    amount: String,
    converted: String,
    rate: String,
    date: String,
}

pub async fn plan_command(trip_id: &str) -> anyhow::Result<()> {
    let lines = get_plan_lines(trip_id).await?;
    if lines.is_empty() {
        println!("No plan lines stored for trip {}.", trip_id);
        return Ok(());
    }

    let rows: Vec<StringifiedPlanLine> = lines
        .iter()
        .map(|line| StringifiedPlanLine {
            category: line.category.clone(),
            description: line.description.clone(),
            amount: format_currency(line.amount, &line.original_currency),
            converted: format_currency(line.converted_amount, &line.target_currency),
            rate: format!("{:.4}", line.exchange_rate),
            date: line
                .date
                .map(|date| date.format("%Y/%m/%d").to_string())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    println!("{}", Table::new(&rows));
    println!("====");

    let summary = summarize_plan(trip_id, &lines);
    for category in &summary.categories {
        println!(
            "{}: {:.2} ({} lines)",
            category.category, category.total_converted, category.line_count
        );
    }
    let total_cli_style = Style::new().black().on_white().bold();
    println!(
        "Planned total: {}",
        format!("{:.2}", summary.total_converted).style(total_cli_style)
    );
    Ok(())
}
