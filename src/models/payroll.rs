// src/models/payroll.rs

use crate::store::{
    Entity,
    timestamp::{calendar_date, optional_calendar_date},
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PayPeriod {
    #[serde(deserialize_with = "calendar_date")]
    pub start: NaiveDate,
    #[serde(deserialize_with = "calendar_date")]
    pub end: NaiveDate,
    #[serde(default, deserialize_with = "optional_calendar_date")]
    pub pay_date: Option<NaiveDate>,
}

/// One allowance or deduction line on a payslip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PayItem {
    #[serde(default)]
    pub label: String,
    pub amount: Decimal,
    /// Set when the line recovers a financial request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financial_request_id: Option<String>,
}

// No transition table: any status may be written over any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Approved,
    Paid,
    Failed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PayrollRecord {
    #[serde(default)]
    pub id: String,
    pub employee_id: String,
    pub pay_period: PayPeriod,
    pub base_salary: Decimal,
    #[serde(default)]
    pub overtime: Decimal,
    #[serde(default)]
    pub bonuses: Decimal,
    #[serde(default)]
    pub allowances: Vec<PayItem>,
    #[serde(default)]
    pub deductions: Vec<PayItem>,
    pub gross_pay: Decimal,
    pub total_deductions: Decimal,
    pub net_pay: Decimal,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for PayrollRecord {
    const COLLECTION: &'static str = "payroll";
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePayrollRequest {
    pub employee_id: String,
    pub pay_period: PayPeriod,
    pub base_salary: Decimal,
    #[serde(default)]
    pub overtime: Decimal,
    #[serde(default)]
    pub bonuses: Decimal,
    #[serde(default)]
    pub allowances: Vec<PayItem>,
    #[serde(default)]
    pub deductions: Vec<PayItem>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdatePayrollRequest {
    pub pay_period: Option<PayPeriod>,
    pub base_salary: Option<Decimal>,
    pub overtime: Option<Decimal>,
    pub bonuses: Option<Decimal>,
    pub allowances: Option<Vec<PayItem>>,
    pub deductions: Option<Vec<PayItem>>,
    pub payment_status: Option<PaymentStatus>,
    pub notes: Option<String>,
}

/// Body for the stateless payroll preview.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PayrollPreviewRequest {
    #[serde(default)]
    pub base_salary: Decimal,
    #[serde(default)]
    pub overtime: Decimal,
    #[serde(default)]
    pub bonuses: Decimal,
    #[serde(default)]
    pub allowances: Vec<PayItem>,
    #[serde(default)]
    pub deductions: Vec<PayItem>,
}
