use tokio_postgres::Row;

use crate::database::{db_client, models::expense_plan::ExpensePlanLine};

fn row_to_line(row: &Row) -> ExpensePlanLine {
    ExpensePlanLine {
        id: row.get("id"),
        trip_id: row.get("trip_id"),
        category: row.get("category"),
        description: row.get("description"),
        amount: row.get("amount"),
        original_currency: row.get("original_currency"),
        target_currency: row.get("target_currency"),
        converted_amount: row.get("converted_amount"),
        exchange_rate: row.get("exchange_rate"),
        iof_tax: row.get("iof_tax"),
        bank_fee: row.get("bank_fee"),
        date: row.get("date"),
        created_at: row.get("created_at"),
    }
}

const LINE_COLUMNS: &str = "id, trip_id, category, description, amount, original_currency, \
                            target_currency, converted_amount, exchange_rate, iof_tax, bank_fee, \
                            date, created_at";

/// Returns false when a line with the same id already exists; the insert
/// is a no-op in that case.
pub async fn add_plan_line(line: &ExpensePlanLine) -> anyhow::Result<bool> {
    let client = db_client().await?;

    let inserted = client
        .execute(
            "INSERT INTO trip_expense_plans (id, trip_id, category, description, amount, \
             original_currency, target_currency, converted_amount, exchange_rate, iof_tax, \
             bank_fee, date, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             ON CONFLICT(id) DO NOTHING",
            &[
                &line.id,
                &line.trip_id,
                &line.category,
                &line.description,
                &line.amount,
                &line.original_currency,
                &line.target_currency,
                &line.converted_amount,
                &line.exchange_rate,
                &line.iof_tax,
                &line.bank_fee,
                &line.date,
                &line.created_at,
            ],
        )
        .await?;

    Ok(inserted > 0)
}

pub async fn get_plan_lines(trip_id: &str) -> anyhow::Result<Vec<ExpensePlanLine>> {
    let client = db_client().await?;

    let query = format!(
        "SELECT {} FROM trip_expense_plans WHERE trip_id = $1 ORDER BY created_at",
        LINE_COLUMNS
    );
    let rows = client.query(&query, &[&trip_id]).await?;

    Ok(rows.iter().map(row_to_line).collect())
}

pub async fn get_plan_line(id: &str) -> anyhow::Result<Option<ExpensePlanLine>> {
    let client = db_client().await?;

    let query = format!(
        "SELECT {} FROM trip_expense_plans WHERE id = $1",
        LINE_COLUMNS
    );
    let row = client.query_opt(&query, &[&id]).await?;

    Ok(row.as_ref().map(row_to_line))
}

/// Rewrites a line in place (same id, same created_at). Returns false when
/// the line no longer exists.
pub async fn update_plan_line(line: &ExpensePlanLine) -> anyhow::Result<bool> {
    let client = db_client().await?;

    let updated = client
        .execute(
            "UPDATE trip_expense_plans SET category = $2, description = $3, amount = $4, \
             original_currency = $5, target_currency = $6, converted_amount = $7, \
             exchange_rate = $8, iof_tax = $9, bank_fee = $10, date = $11 \
             WHERE id = $1",
            &[
                &line.id,
                &line.category,
                &line.description,
                &line.amount,
                &line.original_currency,
                &line.target_currency,
                &line.converted_amount,
                &line.exchange_rate,
                &line.iof_tax,
                &line.bank_fee,
                &line.date,
            ],
        )
        .await?;

    Ok(updated > 0)
}

pub async fn delete_plan_line(id: &str) -> anyhow::Result<bool> {
    let client = db_client().await?;

    let deleted = client
        .execute("DELETE FROM trip_expense_plans WHERE id = $1", &[&id])
        .await?;

    Ok(deleted > 0)
}
