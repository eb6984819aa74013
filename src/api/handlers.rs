use axum::{
    extract::{Json, Path},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use typeshare::typeshare;

use crate::{
    api::errors::ErrorResponse,
    database::{
        models::expense_plan::ExpensePlanLine,
        queries::{
            currency_rate::{get_currency_rate, get_currency_rates, update_currency_rate},
            expense_plan::{
                add_plan_line, delete_plan_line, get_plan_line, get_plan_lines, update_plan_line,
            },
        },
    },
    fx::{
        converter::{convert, ConversionRequest},
        rate_table::RateTable,
    },
    services::{
        planning::summarize_plan,
        shared::{hash_string, round_to_decimals},
    },
};

fn json_response<T: serde::Serialize>(
    data: &T,
) -> Result<(StatusCode, HeaderMap, String), ErrorResponse> {
    let data = serde_json::to_string(data)
        .map_err(|_| ErrorResponse::internal("failed to serialize response"))?;
    let mut headers = HeaderMap::new();
    headers.insert("Content-Type", HeaderValue::from_static("application/json"));
    Ok((StatusCode::OK, headers, data))
}

/// Reads the whole persisted table once, so a single conversion never
/// mixes rates from before and after a concurrent refresh.
async fn load_rate_table() -> Result<RateTable, ErrorResponse> {
    let rows = get_currency_rates()
        .await
        .map_err(|_| ErrorResponse::internal("failed to load the rate table"))?;
    RateTable::from_rates(&rows).map_err(|e| ErrorResponse::from_fx_error(&e))
}

pub async fn list_rates() -> Result<impl IntoResponse, ErrorResponse> {
    let rates = get_currency_rates()
        .await
        .map_err(|_| ErrorResponse::internal("failed to load the rate table"))?;
    json_response(&rates)
}

pub async fn get_rate(Path(code): Path<String>) -> Result<impl IntoResponse, ErrorResponse> {
    let rate = get_currency_rate(&code)
        .await
        .map_err(|_| ErrorResponse::internal("failed to load the rate table"))?;
    match rate {
        Some(rate) => json_response(&rate),
        None => Err(ErrorResponse::not_found(&format!(
            "no stored rate for currency {}",
            code
        ))),
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateRateRequest {
    pub value: Decimal,
    pub name: Option<String>,
}

pub async fn update_rate(
    Path(code): Path<String>,
    Json(payload): Json<UpdateRateRequest>,
) -> Result<impl IntoResponse, ErrorResponse> {
    if payload.value <= Decimal::ZERO {
        return Err(ErrorResponse::bad_request("rate value must be positive"));
    }

    let updated = update_currency_rate(&code, payload.value, payload.name.as_deref())
        .await
        .map_err(|_| ErrorResponse::internal("failed to update the rate"))?;
    match updated {
        Some(rate) => json_response(&rate),
        None => Err(ErrorResponse::not_found(&format!(
            "no stored rate for currency {}",
            code
        ))),
    }
}

#[typeshare]
#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub converted_amount: Decimal,
    pub effective_rate: Decimal,
    pub iof_amount: Option<Decimal>,
    pub bank_fee_amount: Option<Decimal>,
}

fn validate_conversion_request(request: &ConversionRequest) -> Result<(), ErrorResponse> {
    if request.amount < Decimal::ZERO {
        return Err(ErrorResponse::bad_request("amount must be non-negative"));
    }
    if request.from_currency.trim().is_empty() || request.to_currency.trim().is_empty() {
        return Err(ErrorResponse::bad_request("currency codes must be non-empty"));
    }
    for percent in [request.iof_percent, request.bank_fee_percent]
        .into_iter()
        .flatten()
    {
        if percent < Decimal::ZERO {
            return Err(ErrorResponse::bad_request(
                "tax percentages must be non-negative",
            ));
        }
    }
    Ok(())
}

pub async fn convert_currency(
    Json(payload): Json<ConversionRequest>,
) -> Result<impl IntoResponse, ErrorResponse> {
    validate_conversion_request(&payload)?;

    let table = load_rate_table().await?;
    let result = convert(&table, &payload).map_err(|e| ErrorResponse::from_fx_error(&e))?;

    json_response(&ConvertResponse {
        converted_amount: round_to_decimals(result.converted_amount),
        effective_rate: result.effective_rate.round_dp(6),
        iof_amount: result.iof_amount.map(round_to_decimals),
        bank_fee_amount: result.bank_fee_amount.map(round_to_decimals),
    })
}

#[derive(Debug, Deserialize)]
pub struct PlanLineRequest {
    pub category: String,
    pub description: String,
    pub amount: Decimal,
    pub original_currency: String,
    pub target_currency: String,
    pub iof_tax: Option<Decimal>,
    pub bank_fee: Option<Decimal>,
    pub date: Option<NaiveDate>,
}

fn validate_plan_request(request: &PlanLineRequest) -> Result<(), ErrorResponse> {
    if request.amount <= Decimal::ZERO {
        return Err(ErrorResponse::bad_request("amount must be positive"));
    }
    if request.description.trim().chars().count() < 3 {
        return Err(ErrorResponse::bad_request(
            "description must be at least 3 characters",
        ));
    }
    if request.category.trim().is_empty() {
        return Err(ErrorResponse::bad_request("category must be non-empty"));
    }
    if request.original_currency.trim().is_empty() || request.target_currency.trim().is_empty() {
        return Err(ErrorResponse::bad_request("currency codes must be non-empty"));
    }
    for percent in [request.iof_tax, request.bank_fee].into_iter().flatten() {
        if percent < Decimal::ZERO {
            return Err(ErrorResponse::bad_request(
                "tax percentages must be non-negative",
            ));
        }
    }
    Ok(())
}

/// Converts against a fresh snapshot and builds the line that will be
/// persisted. The stored amounts keep full precision; only the rate is
/// truncated, to the 6 decimal places the column historically carried.
async fn materialize_line(
    trip_id: &str,
    existing: Option<&ExpensePlanLine>,
    request: &PlanLineRequest,
) -> Result<ExpensePlanLine, ErrorResponse> {
    let table = load_rate_table().await?;
    let conversion = convert(
        &table,
        &ConversionRequest {
            amount: request.amount,
            from_currency: request.original_currency.clone(),
            to_currency: request.target_currency.clone(),
            iof_percent: request.iof_tax,
            bank_fee_percent: request.bank_fee,
        },
    )
    .map_err(|e| ErrorResponse::from_fx_error(&e))?;

    let created_at = existing.map(|line| line.created_at).unwrap_or_else(Utc::now);
    let id = existing.map(|line| line.id.clone()).unwrap_or_else(|| {
        hash_string(
            format!(
                "{}{}{}{}{}{}",
                trip_id,
                request.category,
                request.description,
                request.amount,
                request.original_currency,
                created_at
            )
            .as_str(),
        )
    });

    Ok(ExpensePlanLine {
        id,
        trip_id: trip_id.to_string(),
        category: request.category.clone(),
        description: request.description.clone(),
        amount: request.amount,
        original_currency: request.original_currency.clone(),
        target_currency: request.target_currency.clone(),
        converted_amount: conversion.converted_amount,
        exchange_rate: conversion.effective_rate.round_dp(6),
        iof_tax: request.iof_tax,
        bank_fee: request.bank_fee,
        date: request.date,
        created_at,
    })
}

pub async fn create_plan_line(
    Path(trip_id): Path<String>,
    Json(payload): Json<PlanLineRequest>,
) -> Result<impl IntoResponse, ErrorResponse> {
    validate_plan_request(&payload)?;

    let line = materialize_line(&trip_id, None, &payload).await?;
    let inserted = add_plan_line(&line)
        .await
        .map_err(|_| ErrorResponse::internal("failed to store the plan line"))?;
    if !inserted {
        return Err(ErrorResponse::conflict(&format!(
            "a plan line with id {} already exists",
            line.id
        )));
    }

    Ok((StatusCode::CREATED, Json(line)))
}

pub async fn list_plan(Path(trip_id): Path<String>) -> Result<impl IntoResponse, ErrorResponse> {
    let lines = get_plan_lines(&trip_id)
        .await
        .map_err(|_| ErrorResponse::internal("failed to load the plan lines"))?;
    json_response(&lines)
}

pub async fn plan_summary(Path(trip_id): Path<String>) -> Result<impl IntoResponse, ErrorResponse> {
    let lines = get_plan_lines(&trip_id)
        .await
        .map_err(|_| ErrorResponse::internal("failed to load the plan lines"))?;
    json_response(&summarize_plan(&trip_id, &lines))
}

pub async fn update_plan(
    Path(id): Path<String>,
    Json(payload): Json<PlanLineRequest>,
) -> Result<impl IntoResponse, ErrorResponse> {
    validate_plan_request(&payload)?;

    let existing = get_plan_line(&id)
        .await
        .map_err(|_| ErrorResponse::internal("failed to load the plan line"))?
        .ok_or_else(|| ErrorResponse::not_found(&format!("no plan line with id {}", id)))?;

    let line = materialize_line(&existing.trip_id, Some(&existing), &payload).await?;
    let updated = update_plan_line(&line)
        .await
        .map_err(|_| ErrorResponse::internal("failed to update the plan line"))?;
    if !updated {
        return Err(ErrorResponse::not_found(&format!(
            "no plan line with id {}",
            id
        )));
    }

    json_response(&line)
}

pub async fn delete_plan(Path(id): Path<String>) -> Result<impl IntoResponse, ErrorResponse> {
    let deleted = delete_plan_line(&id)
        .await
        .map_err(|_| ErrorResponse::internal("failed to delete the plan line"))?;
    if !deleted {
        return Err(ErrorResponse::not_found(&format!(
            "no plan line with id {}",
            id
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}
