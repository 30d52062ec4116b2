// src/handlers/mod.rs

pub mod asset;
pub mod employee;
pub mod financial;
pub mod general;
pub mod leave;
pub mod payroll;
pub mod review;

use crate::{
    errors::{AppError, AppResult},
    models::{EmployeeProfile, ListParams},
    state::AppState,
};
use rust_decimal::Decimal;

/// Reject a missing or blank text field before any store call is made.
pub(crate) fn require_text(field: &str, value: Option<&str>) -> AppResult<()> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(AppError::Validation(format!("{field} is required"))),
    }
}

pub(crate) fn require_positive(field: &str, value: Decimal) -> AppResult<()> {
    if value <= Decimal::ZERO {
        return Err(AppError::Validation(format!(
            "{field} must be greater than zero"
        )));
    }
    Ok(())
}

pub(crate) fn require_non_negative(field: &str, value: Decimal) -> AppResult<()> {
    if value < Decimal::ZERO {
        return Err(AppError::Validation(format!("{field} cannot be negative")));
    }
    Ok(())
}

/// Money sums that do not fit in a `Decimal` are a client error, never a panic.
pub(crate) fn amount_overflow(what: &str) -> AppError {
    AppError::Validation(format!("{what} would exceed the largest supported value"))
}

/// Sort fields are plain top-level keys; anything else is a client mistake.
pub(crate) fn check_list_params(params: &ListParams) -> AppResult<()> {
    if let Some(field) = &params.order_by {
        let valid = !field.is_empty()
            && field
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(AppError::BadRequest(format!(
                "order_by must be a top-level field name, got '{field}'"
            )));
        }
    }
    Ok(())
}

/// Records that reference an employee must point at an existing profile.
pub(crate) async fn ensure_employee(state: &AppState, employee_id: &str) -> AppResult<()> {
    require_text("employee_id", Some(employee_id))?;
    state
        .repo::<EmployeeProfile>()
        .get(employee_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Employee {} not found", employee_id)))?;
    Ok(())
}
