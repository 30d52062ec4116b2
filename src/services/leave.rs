// src/services/leave.rs

use crate::models::{LeaveBalance, LeaveRequest, LeaveRequestStatus, LeaveType};
use chrono::NaiveDate;
use rust_decimal::Decimal;

pub struct LeaveService;

impl LeaveService {
    /// Balance of one leave type for one employee.
    ///
    /// Only requests tagged with `leave_type.id` count. Approved requests are
    /// used days and pending ones are held days. Remaining is not capped, so
    /// over-allocation shows up as a negative balance. Day counts saturate at
    /// the `Decimal` bounds instead of overflowing.
    pub fn balance(
        employee_id: &str,
        leave_type: &LeaveType,
        requests: &[LeaveRequest],
        year: i32,
    ) -> LeaveBalance {
        let mut used = Decimal::ZERO;
        let mut pending = Decimal::ZERO;

        for request in requests.iter().filter(|r| r.leave_type_id == leave_type.id) {
            match request.status {
                LeaveRequestStatus::Approved => used = used.saturating_add(request.total_days),
                LeaveRequestStatus::Pending => {
                    pending = pending.saturating_add(request.total_days)
                }
                LeaveRequestStatus::Rejected | LeaveRequestStatus::Cancelled => {}
            }
        }

        LeaveBalance {
            employee_id: employee_id.to_string(),
            leave_type_id: leave_type.id.clone(),
            leave_type_name: leave_type.name.clone(),
            total_entitlement: leave_type.max_days,
            used,
            pending,
            remaining: leave_type
                .max_days
                .saturating_sub(used)
                .saturating_sub(pending),
            year,
        }
    }

    /// Calendar days from `start` to `end`, both ends included. `None` when
    /// the range is reversed.
    pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> Option<Decimal> {
        let span = end.signed_duration_since(start).num_days();
        (span >= 0).then(|| Decimal::from(span + 1))
    }
}
