// src/handlers/leave.rs

use super::{check_list_params, ensure_employee, require_non_negative, require_positive, require_text};
use crate::{
    errors::{AppError, AppResult},
    models::{
        CreateLeaveRequest, CreateLeaveTypeRequest, LeaveBalance, LeaveBalanceParams,
        LeaveRequest, LeaveRequestStatus, LeaveType, ListParams, UpdateLeaveRequest,
    },
    services::leave::LeaveService,
    state::AppState,
    store::{Query as StoreQuery, StoreResult},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{Datelike, Utc};
use serde::Serialize;
use tracing::info;

// ─── Leave Types ──────────────────────────────────────────────────────────────

/// Define a leave type and its yearly entitlement
#[utoipa::path(
    post,
    path = "/api/v1/leave-types",
    request_body = CreateLeaveTypeRequest,
    responses(
        (status = 201, description = "Leave type created", body = LeaveType),
        (status = 400, description = "Invalid name or entitlement"),
    ),
    tag = "Leave"
)]
pub async fn create_leave_type(
    State(state): State<AppState>,
    Json(body): Json<CreateLeaveTypeRequest>,
) -> AppResult<(StatusCode, Json<LeaveType>)> {
    require_text("name", Some(&body.name))?;
    require_non_negative("max_days", body.max_days)?;

    let leave_type = state
        .repo::<LeaveType>()
        .create(&LeaveType {
            id: String::new(),
            name: body.name.trim().to_string(),
            max_days: body.max_days,
            paid: body.paid,
            description: body.description,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(leave_type)))
}

/// List leave types
#[utoipa::path(
    get,
    path = "/api/v1/leave-types",
    responses((status = 200, description = "Leave types", body = Vec<LeaveType>)),
    tag = "Leave"
)]
pub async fn list_leave_types(State(state): State<AppState>) -> AppResult<Json<Vec<LeaveType>>> {
    let types = state
        .repo::<LeaveType>()
        .list(&StoreQuery::new().order_by("name", Default::default()))
        .await?;
    Ok(Json(types))
}

/// Delete a leave type
#[utoipa::path(
    delete,
    path = "/api/v1/leave-types/{leave_type_id}",
    params(("leave_type_id" = String, Path, description = "Leave type ID")),
    responses(
        (status = 200, description = "Leave type deleted"),
        (status = 404, description = "Leave type not found"),
    ),
    tag = "Leave"
)]
pub async fn delete_leave_type(
    State(state): State<AppState>,
    Path(leave_type_id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    if !state.repo::<LeaveType>().delete(&leave_type_id).await? {
        return Err(AppError::NotFound(format!(
            "Leave type {} not found",
            leave_type_id
        )));
    }
    Ok(Json(serde_json::json!({ "message": "Leave type deleted successfully" })))
}

// ─── Leave Requests ───────────────────────────────────────────────────────────

/// File a leave request
#[utoipa::path(
    post,
    path = "/api/v1/leave-requests",
    request_body = CreateLeaveRequest,
    responses(
        (status = 201, description = "Leave request created", body = LeaveRequest),
        (status = 400, description = "Invalid date range or day count"),
        (status = 404, description = "Employee or leave type not found"),
    ),
    tag = "Leave"
)]
pub async fn create_leave_request(
    State(state): State<AppState>,
    Json(body): Json<CreateLeaveRequest>,
) -> AppResult<(StatusCode, Json<LeaveRequest>)> {
    let span = LeaveService::inclusive_days(body.start_date, body.end_date).ok_or_else(|| {
        AppError::Validation("end_date cannot be before start_date".to_string())
    })?;
    let total_days = body.total_days.unwrap_or(span);
    require_positive("total_days", total_days)?;

    ensure_employee(&state, &body.employee_id).await?;
    state
        .repo::<LeaveType>()
        .get(&body.leave_type_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Leave type {} not found", body.leave_type_id))
        })?;

    let now = Utc::now();
    let request = state
        .repo::<LeaveRequest>()
        .create(&LeaveRequest {
            id: String::new(),
            employee_id: body.employee_id,
            leave_type_id: body.leave_type_id,
            start_date: body.start_date,
            end_date: body.end_date,
            total_days,
            reason: body.reason,
            status: LeaveRequestStatus::Pending,
            created_at: Some(now),
            updated_at: Some(now),
        })
        .await?;

    info!(
        "Leave request {} filed by {} for {} day(s)",
        request.id, request.employee_id, request.total_days
    );
    Ok((StatusCode::CREATED, Json(request)))
}

/// List leave requests, optionally for one employee
#[utoipa::path(
    get,
    path = "/api/v1/leave-requests",
    params(ListParams),
    responses(
        (status = 200, description = "Leave requests", body = Vec<LeaveRequest>),
        (status = 400, description = "Invalid sort field"),
    ),
    tag = "Leave"
)]
pub async fn list_leave_requests(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<LeaveRequest>>> {
    check_list_params(&params)?;
    let requests = state
        .repo::<LeaveRequest>()
        .list(&params.to_query())
        .await?;
    Ok(Json(requests))
}

/// Get a single leave request
#[utoipa::path(
    get,
    path = "/api/v1/leave-requests/{request_id}",
    params(("request_id" = String, Path, description = "Leave request ID")),
    responses(
        (status = 200, description = "Leave request", body = LeaveRequest),
        (status = 404, description = "Leave request not found"),
    ),
    tag = "Leave"
)]
pub async fn get_leave_request(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> AppResult<Json<LeaveRequest>> {
    let request = state
        .repo::<LeaveRequest>()
        .get(&request_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Leave request {} not found", request_id)))?;
    Ok(Json(request))
}

#[derive(Serialize)]
struct LeaveRequestPatch<'a> {
    #[serde(flatten)]
    changes: &'a UpdateLeaveRequest,
    updated_at: chrono::DateTime<Utc>,
}

/// Approve, reject or otherwise update a leave request
#[utoipa::path(
    patch,
    path = "/api/v1/leave-requests/{request_id}",
    request_body = UpdateLeaveRequest,
    params(("request_id" = String, Path, description = "Leave request ID")),
    responses(
        (status = 200, description = "Leave request updated", body = LeaveRequest),
        (status = 404, description = "Leave request not found"),
    ),
    tag = "Leave"
)]
pub async fn update_leave_request(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
    Json(body): Json<UpdateLeaveRequest>,
) -> AppResult<Json<LeaveRequest>> {
    let request = state
        .repo::<LeaveRequest>()
        .update(
            &request_id,
            &LeaveRequestPatch {
                changes: &body,
                updated_at: Utc::now(),
            },
        )
        .await?;

    if let Some(status) = body.status {
        info!("Leave request {} set to {:?}", request_id, status);
    }
    Ok(Json(request))
}

/// Delete a leave request
#[utoipa::path(
    delete,
    path = "/api/v1/leave-requests/{request_id}",
    params(("request_id" = String, Path, description = "Leave request ID")),
    responses(
        (status = 200, description = "Leave request deleted"),
        (status = 404, description = "Leave request not found"),
    ),
    tag = "Leave"
)]
pub async fn delete_leave_request(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    if !state.repo::<LeaveRequest>().delete(&request_id).await? {
        return Err(AppError::NotFound(format!(
            "Leave request {} not found",
            request_id
        )));
    }
    Ok(Json(serde_json::json!({ "message": "Leave request deleted successfully" })))
}

// ─── Balances ─────────────────────────────────────────────────────────────────

/// Balances for every leave type, counting requests that start in `year`.
pub(crate) async fn leave_balances(
    state: &AppState,
    employee_id: &str,
    year: i32,
) -> StoreResult<Vec<LeaveBalance>> {
    let types = state
        .repo::<LeaveType>()
        .list(&StoreQuery::new().order_by("name", Default::default()))
        .await?;
    let requests: Vec<LeaveRequest> = state
        .repo::<LeaveRequest>()
        .list(&StoreQuery::new().filter("employee_id", employee_id))
        .await?
        .into_iter()
        .filter(|r| r.start_date.year() == year)
        .collect();

    Ok(types
        .iter()
        .map(|leave_type| LeaveService::balance(employee_id, leave_type, &requests, year))
        .collect())
}

/// Leave balances of one employee for a year
#[utoipa::path(
    get,
    path = "/api/v1/employees/{employee_id}/leave-balances",
    params(
        ("employee_id" = String, Path, description = "Employee ID"),
        LeaveBalanceParams,
    ),
    responses(
        (status = 200, description = "One balance per leave type", body = Vec<LeaveBalance>),
        (status = 404, description = "Employee not found"),
    ),
    tag = "Leave"
)]
pub async fn get_leave_balances(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    Query(params): Query<LeaveBalanceParams>,
) -> AppResult<Json<Vec<LeaveBalance>>> {
    ensure_employee(&state, &employee_id).await?;
    let year = params.year.unwrap_or_else(|| Utc::now().year());
    Ok(Json(leave_balances(&state, &employee_id, year).await?))
}
