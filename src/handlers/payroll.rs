// src/handlers/payroll.rs

use super::{amount_overflow, check_list_params, ensure_employee};
use crate::{
    errors::{AppError, AppResult},
    models::{
        CreatePayrollRequest, ListParams, PayPeriod, PaymentStatus, PayrollPreviewRequest,
        PayrollRecord, UpdatePayrollRequest,
    },
    services::payroll::{CalculatedPay, PayrollInputs, PayrollService},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use tracing::info;

fn validate_period(period: &PayPeriod) -> AppResult<()> {
    if period.end < period.start {
        return Err(AppError::Validation(
            "pay_period.end cannot be before pay_period.start".to_string(),
        ));
    }
    Ok(())
}

fn validate_amounts(inputs: PayrollInputs<'_>) -> AppResult<()> {
    match PayrollService::first_negative(inputs) {
        Some(field) => Err(AppError::Validation(format!("{field} cannot be negative"))),
        None => Ok(()),
    }
}

/// Compute payroll totals without saving anything
#[utoipa::path(
    post,
    path = "/api/v1/payroll/preview",
    request_body = PayrollPreviewRequest,
    responses(
        (status = 200, description = "Calculated totals", body = CalculatedPay),
        (status = 400, description = "Negative amount or totals too large"),
    ),
    tag = "Payroll"
)]
pub async fn preview_payroll(
    Json(body): Json<PayrollPreviewRequest>,
) -> AppResult<Json<CalculatedPay>> {
    let inputs = PayrollInputs::from(&body);
    validate_amounts(inputs)?;
    let pay =
        PayrollService::calculate(inputs).ok_or_else(|| amount_overflow("payroll totals"))?;
    Ok(Json(pay))
}

/// Create a payroll record; gross and net pay are derived on save
#[utoipa::path(
    post,
    path = "/api/v1/payroll",
    request_body = CreatePayrollRequest,
    responses(
        (status = 201, description = "Payroll record created", body = PayrollRecord),
        (status = 400, description = "Invalid amounts or pay period"),
        (status = 404, description = "Employee not found"),
    ),
    tag = "Payroll"
)]
pub async fn create_payroll(
    State(state): State<AppState>,
    Json(body): Json<CreatePayrollRequest>,
) -> AppResult<(StatusCode, Json<PayrollRecord>)> {
    validate_period(&body.pay_period)?;

    let now = Utc::now();
    let mut record = PayrollRecord {
        id: String::new(),
        employee_id: body.employee_id,
        pay_period: body.pay_period,
        base_salary: body.base_salary,
        overtime: body.overtime,
        bonuses: body.bonuses,
        allowances: body.allowances,
        deductions: body.deductions,
        gross_pay: Default::default(),
        total_deductions: Default::default(),
        net_pay: Default::default(),
        payment_status: PaymentStatus::Pending,
        notes: body.notes,
        created_at: Some(now),
        updated_at: Some(now),
    };
    validate_amounts(PayrollInputs::from(&record))?;
    PayrollService::refresh_totals(&mut record)
        .ok_or_else(|| amount_overflow("payroll totals"))?;
    ensure_employee(&state, &record.employee_id).await?;

    let record = state.repo::<PayrollRecord>().create(&record).await?;

    info!(
        "Created payroll record {} for employee {} (net {})",
        record.id, record.employee_id, record.net_pay
    );
    Ok((StatusCode::CREATED, Json(record)))
}

/// List payroll records, optionally for one employee
#[utoipa::path(
    get,
    path = "/api/v1/payroll",
    params(ListParams),
    responses(
        (status = 200, description = "Payroll records", body = Vec<PayrollRecord>),
        (status = 400, description = "Invalid sort field"),
    ),
    tag = "Payroll"
)]
pub async fn list_payroll(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<PayrollRecord>>> {
    check_list_params(&params)?;
    let records = state
        .repo::<PayrollRecord>()
        .list(&params.to_query())
        .await?;
    Ok(Json(records))
}

/// Get a single payroll record
#[utoipa::path(
    get,
    path = "/api/v1/payroll/{payroll_id}",
    params(("payroll_id" = String, Path, description = "Payroll record ID")),
    responses(
        (status = 200, description = "Payroll record", body = PayrollRecord),
        (status = 404, description = "Payroll record not found"),
    ),
    tag = "Payroll"
)]
pub async fn get_payroll(
    State(state): State<AppState>,
    Path(payroll_id): Path<String>,
) -> AppResult<Json<PayrollRecord>> {
    let record = state
        .repo::<PayrollRecord>()
        .get(&payroll_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Payroll record {} not found", payroll_id)))?;
    Ok(Json(record))
}

/// Update a payroll record; totals are recomputed from the merged inputs
#[utoipa::path(
    patch,
    path = "/api/v1/payroll/{payroll_id}",
    request_body = UpdatePayrollRequest,
    params(("payroll_id" = String, Path, description = "Payroll record ID")),
    responses(
        (status = 200, description = "Payroll record updated", body = PayrollRecord),
        (status = 400, description = "Invalid amounts or pay period"),
        (status = 404, description = "Payroll record not found"),
    ),
    tag = "Payroll"
)]
pub async fn update_payroll(
    State(state): State<AppState>,
    Path(payroll_id): Path<String>,
    Json(body): Json<UpdatePayrollRequest>,
) -> AppResult<Json<PayrollRecord>> {
    let repo = state.repo::<PayrollRecord>();
    let mut record = repo
        .get(&payroll_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Payroll record {} not found", payroll_id)))?;

    let previous_status = record.payment_status;
    let UpdatePayrollRequest {
        pay_period,
        base_salary,
        overtime,
        bonuses,
        allowances,
        deductions,
        payment_status,
        notes,
    } = body;

    if let Some(period) = pay_period {
        validate_period(&period)?;
        record.pay_period = period;
    }
    if let Some(v) = base_salary {
        record.base_salary = v;
    }
    if let Some(v) = overtime {
        record.overtime = v;
    }
    if let Some(v) = bonuses {
        record.bonuses = v;
    }
    if let Some(v) = allowances {
        record.allowances = v;
    }
    if let Some(v) = deductions {
        record.deductions = v;
    }
    if let Some(status) = payment_status {
        record.payment_status = status;
    }
    if notes.is_some() {
        record.notes = notes;
    }
    validate_amounts(PayrollInputs::from(&record))?;
    PayrollService::refresh_totals(&mut record)
        .ok_or_else(|| amount_overflow("payroll totals"))?;

    record.updated_at = Some(Utc::now());
    let record = repo.update(&payroll_id, &record).await?;

    if previous_status != record.payment_status {
        info!(
            "Payroll record {} status {:?} -> {:?}",
            payroll_id, previous_status, record.payment_status
        );
    }
    Ok(Json(record))
}

/// Delete a payroll record
#[utoipa::path(
    delete,
    path = "/api/v1/payroll/{payroll_id}",
    params(("payroll_id" = String, Path, description = "Payroll record ID")),
    responses(
        (status = 200, description = "Payroll record deleted"),
        (status = 404, description = "Payroll record not found"),
    ),
    tag = "Payroll"
)]
pub async fn delete_payroll(
    State(state): State<AppState>,
    Path(payroll_id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    if !state.repo::<PayrollRecord>().delete(&payroll_id).await? {
        return Err(AppError::NotFound(format!(
            "Payroll record {} not found",
            payroll_id
        )));
    }
    Ok(Json(serde_json::json!({ "message": "Payroll record deleted successfully" })))
}
