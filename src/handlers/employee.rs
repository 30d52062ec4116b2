// src/handlers/employee.rs

use super::{check_list_params, leave::leave_balances, require_text};
use crate::{
    errors::{AppError, AppResult},
    models::{
        CompletenessResponse, CreateEmployeeRequest, EmployeeOverview, EmployeeProfile,
        FinancialRequest, FinancialRequestStatus, LeaveBalanceParams, ListParams, PayrollRecord,
        ProfileStatus, UpdateEmployeeRequest,
    },
    services::completeness::profile_completeness,
    state::AppState,
    store::{Query as StoreQuery, StoreResult},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

#[derive(Serialize)]
struct EmployeePatch<'a> {
    #[serde(flatten)]
    changes: &'a UpdateEmployeeRequest,
    profile_status: &'a ProfileStatus,
    updated_at: chrono::DateTime<Utc>,
}

fn validate_names(profile: &EmployeeProfile) -> AppResult<()> {
    let personal = profile.personal_info.as_ref();
    require_text(
        "personal_info.first_name",
        personal.and_then(|p| p.first_name.as_deref()),
    )?;
    require_text(
        "personal_info.last_name",
        personal.and_then(|p| p.last_name.as_deref()),
    )
}

/// Onboard a new employee profile
#[utoipa::path(
    post,
    path = "/api/v1/employees",
    request_body = CreateEmployeeRequest,
    responses(
        (status = 201, description = "Employee created", body = EmployeeProfile),
        (status = 400, description = "Missing required name fields"),
    ),
    tag = "Employees"
)]
pub async fn create_employee(
    State(state): State<AppState>,
    Json(body): Json<CreateEmployeeRequest>,
) -> AppResult<(StatusCode, Json<EmployeeProfile>)> {
    let now = Utc::now();
    let mut profile = EmployeeProfile {
        id: String::new(),
        personal_info: Some(body.personal_info),
        contact_info: body.contact_info,
        work_info: body.work_info,
        banking_info: body.banking_info,
        skills: body.skills,
        emergency_contacts: body.emergency_contacts,
        documents: body.documents,
        profile_status: None,
        created_at: Some(now),
        updated_at: Some(now),
    };
    validate_names(&profile)?;

    profile.profile_status = Some(ProfileStatus {
        completeness: profile_completeness(&profile),
        last_updated: now,
    });

    let employee = state.repo::<EmployeeProfile>().create(&profile).await?;
    info!(
        "Created employee {} ({})",
        employee.id,
        employee.full_name()
    );

    Ok((StatusCode::CREATED, Json(employee)))
}

/// List employee profiles
#[utoipa::path(
    get,
    path = "/api/v1/employees",
    params(ListParams),
    responses(
        (status = 200, description = "List of employees", body = Vec<EmployeeProfile>),
        (status = 400, description = "Invalid sort field"),
    ),
    tag = "Employees"
)]
pub async fn list_employees(
    State(state): State<AppState>,
    Query(mut params): Query<ListParams>,
) -> AppResult<Json<Vec<EmployeeProfile>>> {
    check_list_params(&params)?;
    // Profiles carry no employee_id field; the filter only applies to child records.
    params.employee_id = None;
    let employees = state
        .repo::<EmployeeProfile>()
        .list(&params.to_query())
        .await?;

    Ok(Json(employees))
}

/// Get a single employee profile
#[utoipa::path(
    get,
    path = "/api/v1/employees/{employee_id}",
    params(("employee_id" = String, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee detail", body = EmployeeProfile),
        (status = 404, description = "Employee not found"),
    ),
    tag = "Employees"
)]
pub async fn get_employee(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> AppResult<Json<EmployeeProfile>> {
    let employee = state
        .repo::<EmployeeProfile>()
        .get(&employee_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Employee {} not found", employee_id)))?;

    Ok(Json(employee))
}

/// Update sections of an employee profile; completeness is recomputed
#[utoipa::path(
    patch,
    path = "/api/v1/employees/{employee_id}",
    request_body = UpdateEmployeeRequest,
    params(("employee_id" = String, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee updated", body = EmployeeProfile),
        (status = 400, description = "Name fields cleared"),
        (status = 404, description = "Employee not found"),
    ),
    tag = "Employees"
)]
pub async fn update_employee(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    Json(body): Json<UpdateEmployeeRequest>,
) -> AppResult<Json<EmployeeProfile>> {
    let repo = state.repo::<EmployeeProfile>();
    let mut merged = repo
        .get(&employee_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Employee {} not found", employee_id)))?;

    if let Some(personal) = &body.personal_info {
        merged.personal_info = Some(personal.clone());
    }
    if let Some(contact) = &body.contact_info {
        merged.contact_info = Some(contact.clone());
    }
    if let Some(work) = &body.work_info {
        merged.work_info = Some(work.clone());
    }
    if let Some(banking) = &body.banking_info {
        merged.banking_info = Some(banking.clone());
    }
    if let Some(skills) = &body.skills {
        merged.skills = skills.clone();
    }
    if let Some(contacts) = &body.emergency_contacts {
        merged.emergency_contacts = contacts.clone();
    }
    if let Some(documents) = &body.documents {
        merged.documents = documents.clone();
    }
    validate_names(&merged)?;

    let now = Utc::now();
    let status = ProfileStatus {
        completeness: profile_completeness(&merged),
        last_updated: now,
    };
    let employee = repo
        .update(
            &employee_id,
            &EmployeePatch {
                changes: &body,
                profile_status: &status,
                updated_at: now,
            },
        )
        .await?;

    info!(
        "Updated employee {} (completeness {}%)",
        employee_id, status.completeness
    );
    Ok(Json(employee))
}

/// Delete an employee profile
#[utoipa::path(
    delete,
    path = "/api/v1/employees/{employee_id}",
    params(("employee_id" = String, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee deleted"),
        (status = 404, description = "Employee not found"),
    ),
    tag = "Employees"
)]
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    if !state.repo::<EmployeeProfile>().delete(&employee_id).await? {
        return Err(AppError::NotFound(format!("Employee {} not found", employee_id)));
    }

    info!("Deleted employee {}", employee_id);
    Ok(Json(serde_json::json!({ "message": "Employee deleted successfully" })))
}

/// Current profile completeness score
#[utoipa::path(
    get,
    path = "/api/v1/employees/{employee_id}/completeness",
    params(("employee_id" = String, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Completeness score", body = CompletenessResponse),
        (status = 404, description = "Employee not found"),
    ),
    tag = "Employees"
)]
pub async fn get_completeness(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> AppResult<Json<CompletenessResponse>> {
    let employee = state
        .repo::<EmployeeProfile>()
        .get(&employee_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Employee {} not found", employee_id)))?;

    Ok(Json(CompletenessResponse {
        completeness: profile_completeness(&employee),
        employee_id,
    }))
}

// ─── Overview ─────────────────────────────────────────────────────────────────

fn or_empty<T: Default>(part: &str, employee_id: &str, result: StoreResult<T>) -> T {
    result.unwrap_or_else(|e| {
        warn!(
            "Overview for employee {}: {} unavailable, showing empty: {}",
            employee_id, part, e
        );
        T::default()
    })
}

/// Profile, leave balances, payroll and financial requests in one call
///
/// The four reads run concurrently. A failed read is logged and replaced by
/// an empty value instead of failing the whole response.
#[utoipa::path(
    get,
    path = "/api/v1/employees/{employee_id}/overview",
    params(
        ("employee_id" = String, Path, description = "Employee ID"),
        LeaveBalanceParams,
    ),
    responses((status = 200, description = "Employee overview", body = EmployeeOverview)),
    tag = "Employees"
)]
pub async fn get_overview(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    Query(params): Query<LeaveBalanceParams>,
) -> AppResult<Json<EmployeeOverview>> {
    let year = params.year.unwrap_or_else(|| Utc::now().year());
    let by_employee = StoreQuery::new().filter("employee_id", employee_id.as_str());

    let employees = state.repo::<EmployeeProfile>();
    let payrolls = state.repo::<PayrollRecord>();
    let financials = state.repo::<FinancialRequest>();

    let (profile, leave, payroll, financial) = tokio::join!(
        employees.get(&employee_id),
        leave_balances(&state, &employee_id, year),
        payrolls.list(&by_employee),
        financials.list(&by_employee),
    );

    let profile = or_empty("profile", &employee_id, profile);
    let leave_balances = or_empty("leave balances", &employee_id, leave);
    let payroll_records = or_empty("payroll records", &employee_id, payroll);
    let financial_requests = or_empty("financial requests", &employee_id, financial);

    let outstanding_balance = financial_requests
        .iter()
        .filter(|r| {
            !matches!(
                r.status,
                FinancialRequestStatus::Rejected | FinancialRequestStatus::Cancelled
            )
        })
        .map(|r| r.remaining_balance.max(Decimal::ZERO))
        .fold(Decimal::ZERO, Decimal::saturating_add);

    Ok(Json(EmployeeOverview {
        completeness: profile.as_ref().map(profile_completeness).unwrap_or(0),
        employee_id,
        profile,
        leave_balances,
        payroll_records,
        financial_requests,
        outstanding_balance,
    }))
}
