// src/models/financial.rs

use super::PayrollRecord;
use crate::store::Entity;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FinancialRequestType {
    Advance,
    Loan,
    Reimbursement,
    Allowance,
}

impl FinancialRequestType {
    pub fn label(self) -> &'static str {
        match self {
            FinancialRequestType::Advance => "Salary advance",
            FinancialRequestType::Loan => "Loan",
            FinancialRequestType::Reimbursement => "Reimbursement",
            FinancialRequestType::Allowance => "Allowance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RepaymentType {
    Full,
    Installments,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FinancialRequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Disbursed,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FinancialRequest {
    #[serde(default)]
    pub id: String,
    pub employee_id: String,
    pub request_type: FinancialRequestType,
    pub amount: Decimal,
    pub reason: Option<String>,
    pub repayment_type: RepaymentType,
    pub installment_months: u32,
    pub installment_amount: Decimal,
    #[serde(default)]
    pub amount_recovered: Decimal,
    pub remaining_balance: Decimal,
    #[serde(default)]
    pub status: FinancialRequestStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for FinancialRequest {
    const COLLECTION: &'static str = "financial_requests";
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateFinancialRequest {
    pub employee_id: String,
    pub request_type: FinancialRequestType,
    pub amount: Decimal,
    pub reason: Option<String>,
    pub repayment_type: RepaymentType,
    /// Required when `repayment_type` is `installments`
    pub installment_months: Option<u32>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateFinancialRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<FinancialRequestStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RecordRecoveryRequest {
    pub amount: Decimal,
    /// Payroll record that withheld the amount; a deduction line is added to it
    pub payroll_record_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecoveryOutcome {
    pub financial_request: FinancialRequest,
    pub payroll_record: Option<PayrollRecord>,
    pub settled: bool,
    pub overpaid: bool,
}
