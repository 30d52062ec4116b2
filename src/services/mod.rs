// src/services/mod.rs

pub mod completeness;
pub mod leave;
pub mod payroll;
pub mod repayment;
pub mod review;
