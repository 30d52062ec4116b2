// src/services/payroll.rs

use crate::models::{PayItem, PayrollPreviewRequest, PayrollRecord};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

pub struct PayrollService;

/// Borrowed view of the fields that feed the payroll totals.
#[derive(Debug, Clone, Copy)]
pub struct PayrollInputs<'a> {
    pub base_salary: Decimal,
    pub overtime: Decimal,
    pub bonuses: Decimal,
    pub allowances: &'a [PayItem],
    pub deductions: &'a [PayItem],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct CalculatedPay {
    pub gross_pay: Decimal,
    pub total_deductions: Decimal,
    pub net_pay: Decimal,
}

impl<'a> From<&'a PayrollRecord> for PayrollInputs<'a> {
    fn from(record: &'a PayrollRecord) -> Self {
        PayrollInputs {
            base_salary: record.base_salary,
            overtime: record.overtime,
            bonuses: record.bonuses,
            allowances: &record.allowances,
            deductions: &record.deductions,
        }
    }
}

impl<'a> From<&'a PayrollPreviewRequest> for PayrollInputs<'a> {
    fn from(req: &'a PayrollPreviewRequest) -> Self {
        PayrollInputs {
            base_salary: req.base_salary,
            overtime: req.overtime,
            bonuses: req.bonuses,
            allowances: &req.allowances,
            deductions: &req.deductions,
        }
    }
}

impl PayrollService {
    /// Gross, deductions and net for one pay period, or `None` when a sum
    /// does not fit in a `Decimal`.
    ///
    /// Net pay is not clamped: deductions larger than gross produce a negative
    /// net, which callers report as-is.
    pub fn calculate(inputs: PayrollInputs<'_>) -> Option<CalculatedPay> {
        let allowances = checked_sum(inputs.allowances)?;
        let total_deductions = checked_sum(inputs.deductions)?;

        let gross_pay = inputs
            .base_salary
            .checked_add(inputs.overtime)?
            .checked_add(inputs.bonuses)?
            .checked_add(allowances)?;
        let net_pay = gross_pay.checked_sub(total_deductions)?;

        Some(CalculatedPay {
            gross_pay,
            total_deductions,
            net_pay,
        })
    }

    /// Name of the first negative money field, if any.
    pub fn first_negative(inputs: PayrollInputs<'_>) -> Option<&'static str> {
        let zero = Decimal::ZERO;
        if inputs.base_salary < zero {
            Some("base_salary")
        } else if inputs.overtime < zero {
            Some("overtime")
        } else if inputs.bonuses < zero {
            Some("bonuses")
        } else if inputs.allowances.iter().any(|a| a.amount < zero) {
            Some("allowances")
        } else if inputs.deductions.iter().any(|d| d.amount < zero) {
            Some("deductions")
        } else {
            None
        }
    }

    /// Recompute the stored derived fields from the record's own inputs. On
    /// overflow the record is left untouched and `None` is returned.
    pub fn refresh_totals(record: &mut PayrollRecord) -> Option<CalculatedPay> {
        let pay = Self::calculate(PayrollInputs::from(&*record))?;
        record.gross_pay = pay.gross_pay;
        record.total_deductions = pay.total_deductions;
        record.net_pay = pay.net_pay;
        Some(pay)
    }
}

fn checked_sum(items: &[PayItem]) -> Option<Decimal> {
    items
        .iter()
        .try_fold(Decimal::ZERO, |total, item| total.checked_add(item.amount))
}
