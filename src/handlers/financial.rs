// src/handlers/financial.rs

use super::{amount_overflow, check_list_params, ensure_employee, require_positive};
use crate::{
    errors::{AppError, AppResult},
    models::{
        CreateFinancialRequest, FinancialRequest, FinancialRequestStatus, ListParams, PayItem,
        PayrollRecord, RecordRecoveryRequest, RecoveryOutcome, UpdateFinancialRequest,
    },
    services::{
        payroll::PayrollService,
        repayment::{Repayment, RepaymentTracker},
    },
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{error, info};

/// Submit a salary advance, loan, reimbursement or allowance request
#[utoipa::path(
    post,
    path = "/api/v1/financial-requests",
    request_body = CreateFinancialRequest,
    responses(
        (status = 201, description = "Financial request created", body = FinancialRequest),
        (status = 400, description = "Invalid amount or installment count"),
        (status = 404, description = "Employee not found"),
    ),
    tag = "Financial Requests"
)]
pub async fn create_financial_request(
    State(state): State<AppState>,
    Json(body): Json<CreateFinancialRequest>,
) -> AppResult<(StatusCode, Json<FinancialRequest>)> {
    require_positive("amount", body.amount)?;
    let repayment = Repayment::new(body.repayment_type, body.installment_months).ok_or_else(|| {
        AppError::Validation(
            "installment_months must be at least 1 for installment repayment".to_string(),
        )
    })?;
    ensure_employee(&state, &body.employee_id).await?;

    let schedule = RepaymentTracker::schedule(body.amount, repayment);
    let progress = RepaymentTracker::progress(body.amount, Decimal::ZERO)
        .ok_or_else(|| amount_overflow("amount"))?;
    let now = Utc::now();

    let request = state
        .repo::<FinancialRequest>()
        .create(&FinancialRequest {
            id: String::new(),
            employee_id: body.employee_id,
            request_type: body.request_type,
            amount: body.amount,
            reason: body.reason,
            repayment_type: body.repayment_type,
            installment_months: schedule.installment_months,
            installment_amount: schedule.installment_amount,
            amount_recovered: progress.amount_recovered,
            remaining_balance: progress.remaining_balance,
            status: FinancialRequestStatus::Pending,
            created_at: Some(now),
            updated_at: Some(now),
        })
        .await?;

    info!(
        "Financial request {} ({:?}) for {}: {} over {} installment(s)",
        request.id,
        request.request_type,
        request.employee_id,
        request.amount,
        request.installment_months
    );
    Ok((StatusCode::CREATED, Json(request)))
}

/// List financial requests, optionally for one employee
#[utoipa::path(
    get,
    path = "/api/v1/financial-requests",
    params(ListParams),
    responses(
        (status = 200, description = "Financial requests", body = Vec<FinancialRequest>),
        (status = 400, description = "Invalid sort field"),
    ),
    tag = "Financial Requests"
)]
pub async fn list_financial_requests(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<FinancialRequest>>> {
    check_list_params(&params)?;
    let requests = state
        .repo::<FinancialRequest>()
        .list(&params.to_query())
        .await?;
    Ok(Json(requests))
}

/// Get a single financial request
#[utoipa::path(
    get,
    path = "/api/v1/financial-requests/{request_id}",
    params(("request_id" = String, Path, description = "Financial request ID")),
    responses(
        (status = 200, description = "Financial request", body = FinancialRequest),
        (status = 404, description = "Financial request not found"),
    ),
    tag = "Financial Requests"
)]
pub async fn get_financial_request(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> AppResult<Json<FinancialRequest>> {
    let request = state
        .repo::<FinancialRequest>()
        .get(&request_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Financial request {} not found", request_id))
        })?;
    Ok(Json(request))
}

#[derive(Serialize)]
struct FinancialRequestPatch<'a> {
    #[serde(flatten)]
    changes: &'a UpdateFinancialRequest,
    updated_at: DateTime<Utc>,
}

/// Change the status or reason of a financial request
#[utoipa::path(
    patch,
    path = "/api/v1/financial-requests/{request_id}",
    request_body = UpdateFinancialRequest,
    params(("request_id" = String, Path, description = "Financial request ID")),
    responses(
        (status = 200, description = "Financial request updated", body = FinancialRequest),
        (status = 404, description = "Financial request not found"),
    ),
    tag = "Financial Requests"
)]
pub async fn update_financial_request(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
    Json(body): Json<UpdateFinancialRequest>,
) -> AppResult<Json<FinancialRequest>> {
    let request = state
        .repo::<FinancialRequest>()
        .update(
            &request_id,
            &FinancialRequestPatch {
                changes: &body,
                updated_at: Utc::now(),
            },
        )
        .await?;

    if let Some(status) = body.status {
        info!("Financial request {} set to {:?}", request_id, status);
    }
    Ok(Json(request))
}

/// Delete a financial request
#[utoipa::path(
    delete,
    path = "/api/v1/financial-requests/{request_id}",
    params(("request_id" = String, Path, description = "Financial request ID")),
    responses(
        (status = 200, description = "Financial request deleted"),
        (status = 404, description = "Financial request not found"),
    ),
    tag = "Financial Requests"
)]
pub async fn delete_financial_request(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    if !state.repo::<FinancialRequest>().delete(&request_id).await? {
        return Err(AppError::NotFound(format!(
            "Financial request {} not found",
            request_id
        )));
    }
    Ok(Json(serde_json::json!({ "message": "Financial request deleted successfully" })))
}

#[derive(Serialize)]
struct RecoveryPatch {
    amount_recovered: Decimal,
    remaining_balance: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<FinancialRequestStatus>,
    updated_at: DateTime<Utc>,
}

/// Record an amount recovered against a financial request
///
/// When `payroll_record_id` is given the amount is also added as a deduction
/// on that payroll record. The two writes are independent: if the payroll
/// write fails the recovery itself has already been saved.
#[utoipa::path(
    post,
    path = "/api/v1/financial-requests/{request_id}/recoveries",
    request_body = RecordRecoveryRequest,
    params(("request_id" = String, Path, description = "Financial request ID")),
    responses(
        (status = 200, description = "Recovery recorded", body = RecoveryOutcome),
        (status = 400, description = "Non-positive amount or totals too large"),
        (status = 404, description = "Financial request or payroll record not found"),
    ),
    tag = "Financial Requests"
)]
pub async fn record_recovery(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
    Json(body): Json<RecordRecoveryRequest>,
) -> AppResult<Json<RecoveryOutcome>> {
    require_positive("amount", body.amount)?;

    let requests = state.repo::<FinancialRequest>();
    let payrolls = state.repo::<PayrollRecord>();

    let request = requests
        .get(&request_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Financial request {} not found", request_id))
        })?;

    let progress = RepaymentTracker::record(request.amount, request.amount_recovered, body.amount)
        .ok_or_else(|| amount_overflow("recovered amounts"))?;
    let now = Utc::now();

    // Resolve and recompute the payroll record up front so an unknown id or
    // an overflowing total fails before any write.
    let payroll = match &body.payroll_record_id {
        Some(payroll_id) => {
            let mut record = payrolls.get(payroll_id).await?.ok_or_else(|| {
                AppError::NotFound(format!("Payroll record {} not found", payroll_id))
            })?;
            record.deductions.push(PayItem {
                label: format!("{} recovery", request.request_type.label()),
                amount: body.amount,
                financial_request_id: Some(request_id.clone()),
            });
            PayrollService::refresh_totals(&mut record)
                .ok_or_else(|| amount_overflow("payroll totals"))?;
            record.updated_at = Some(now);
            Some(record)
        }
        None => None,
    };

    let financial_request = requests
        .update(
            &request_id,
            &RecoveryPatch {
                amount_recovered: progress.amount_recovered,
                remaining_balance: progress.remaining_balance,
                status: progress.settled.then_some(FinancialRequestStatus::Completed),
                updated_at: now,
            },
        )
        .await?;

    info!(
        "Recovered {} on financial request {} (remaining {})",
        body.amount, request_id, progress.remaining_balance
    );

    let payroll_record = match payroll {
        Some(record) => {
            let updated = payrolls.update(&record.id, &record).await.map_err(|e| {
                error!(
                    "Recovery on {} saved but payroll record {} was not updated: {}",
                    request_id, record.id, e
                );
                e
            })?;
            Some(updated)
        }
        None => None,
    };

    Ok(Json(RecoveryOutcome {
        financial_request,
        payroll_record,
        settled: progress.settled,
        overpaid: progress.overpaid,
    }))
}
