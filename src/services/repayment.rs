// src/services/repayment.rs

use crate::models::RepaymentType;
use rust_decimal::Decimal;
use std::num::NonZeroU32;

/// How a financial request is paid back. The installment count is non-zero by
/// construction, so scheduling never divides by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repayment {
    Full,
    Installments(NonZeroU32),
}

impl Repayment {
    /// `None` when installments are requested without a positive month count.
    pub fn new(repayment_type: RepaymentType, installment_months: Option<u32>) -> Option<Self> {
        match repayment_type {
            RepaymentType::Full => Some(Repayment::Full),
            RepaymentType::Installments => installment_months
                .and_then(NonZeroU32::new)
                .map(Repayment::Installments),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepaymentSchedule {
    pub installment_months: u32,
    pub installment_amount: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepaymentProgress {
    pub amount_recovered: Decimal,
    pub remaining_balance: Decimal,
    pub settled: bool,
    pub overpaid: bool,
}

pub struct RepaymentTracker;

impl RepaymentTracker {
    /// Full repayment is a single installment of the whole amount; otherwise
    /// each installment is the amount divided by the month count, rounded up.
    pub fn schedule(amount: Decimal, repayment: Repayment) -> RepaymentSchedule {
        match repayment {
            Repayment::Full => RepaymentSchedule {
                installment_months: 1,
                installment_amount: amount,
            },
            Repayment::Installments(months) => RepaymentSchedule {
                installment_months: months.get(),
                installment_amount: (amount / Decimal::from(months.get())).ceil(),
            },
        }
    }

    /// Remaining balance is left unclamped; a negative value means the
    /// employee has repaid more than was lent. `None` on overflow.
    pub fn progress(amount: Decimal, amount_recovered: Decimal) -> Option<RepaymentProgress> {
        let remaining_balance = amount.checked_sub(amount_recovered)?;
        Some(RepaymentProgress {
            amount_recovered,
            remaining_balance,
            settled: remaining_balance <= Decimal::ZERO,
            overpaid: remaining_balance < Decimal::ZERO,
        })
    }

    /// Progress after recovering `amount` on top of what was already repaid.
    pub fn record(
        amount: Decimal,
        already_recovered: Decimal,
        recovered_now: Decimal,
    ) -> Option<RepaymentProgress> {
        Self::progress(amount, already_recovered.checked_add(recovered_now)?)
    }
}
