// src/models/mod.rs

mod asset;
mod employee;
mod financial;
mod leave;
mod payroll;
mod review;

pub use asset::*;
pub use employee::*;
pub use financial::*;
pub use leave::*;
pub use payroll::*;
pub use review::*;

use crate::store::{Query, SortDirection};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// ─── Listing ──────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Only return records belonging to this employee
    pub employee_id: Option<String>,
    /// Top-level field to sort by
    pub order_by: Option<String>,
    pub direction: Option<SortDirection>,
}

impl ListParams {
    /// Build a store query. Without `order_by` records come back in creation
    /// order.
    pub fn to_query(&self) -> Query {
        let mut query = Query::new();
        if let Some(employee_id) = &self.employee_id {
            query = query.filter("employee_id", employee_id.as_str());
        }
        if let Some(field) = &self.order_by {
            query = query.order_by(field, self.direction.unwrap_or_default());
        }
        query
    }
}

// ─── Overview ─────────────────────────────────────────────────────────────────

/// Everything the employee dashboard shows, gathered in one response.
#[derive(Debug, Serialize, ToSchema)]
pub struct EmployeeOverview {
    pub employee_id: String,
    pub profile: Option<EmployeeProfile>,
    pub completeness: u8,
    pub leave_balances: Vec<LeaveBalance>,
    pub payroll_records: Vec<PayrollRecord>,
    pub financial_requests: Vec<FinancialRequest>,
    /// Sum of positive remaining balances across financial requests
    pub outstanding_balance: Decimal,
}
