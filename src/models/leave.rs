// src/models/leave.rs

use crate::store::{Entity, timestamp::calendar_date};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// ─── Leave Types ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LeaveType {
    #[serde(default)]
    pub id: String,
    pub name: String,
    /// Yearly entitlement in days
    pub max_days: Decimal,
    #[serde(default)]
    pub paid: bool,
    pub description: Option<String>,
}

impl Entity for LeaveType {
    const COLLECTION: &'static str = "leave_types";
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateLeaveTypeRequest {
    pub name: String,
    pub max_days: Decimal,
    #[serde(default)]
    pub paid: bool,
    pub description: Option<String>,
}

// ─── Leave Requests ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LeaveRequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LeaveRequest {
    #[serde(default)]
    pub id: String,
    pub employee_id: String,
    pub leave_type_id: String,
    #[serde(deserialize_with = "calendar_date")]
    pub start_date: NaiveDate,
    #[serde(deserialize_with = "calendar_date")]
    pub end_date: NaiveDate,
    pub total_days: Decimal,
    pub reason: Option<String>,
    #[serde(default)]
    pub status: LeaveRequestStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for LeaveRequest {
    const COLLECTION: &'static str = "leave_requests";
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateLeaveRequest {
    pub employee_id: String,
    pub leave_type_id: String,
    #[serde(deserialize_with = "calendar_date")]
    pub start_date: NaiveDate,
    #[serde(deserialize_with = "calendar_date")]
    pub end_date: NaiveDate,
    /// Defaults to the inclusive day count between the two dates
    pub total_days: Option<Decimal>,
    pub reason: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateLeaveRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LeaveRequestStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

// ─── Balances ─────────────────────────────────────────────────────────────────

/// Computed per view, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LeaveBalance {
    pub employee_id: String,
    pub leave_type_id: String,
    pub leave_type_name: String,
    pub total_entitlement: Decimal,
    pub used: Decimal,
    pub pending: Decimal,
    pub remaining: Decimal,
    pub year: i32,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LeaveBalanceParams {
    /// Calendar year to report on; defaults to the current year
    pub year: Option<i32>,
}
