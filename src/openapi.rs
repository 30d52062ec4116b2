// src/openapi.rs

use crate::{
    models::{
        Address, Asset, AssetRequest, AssetRequestStatus, AssetStatus, BankingInfo,
        CompetencyRating, CompletenessResponse, ContactInfo, CreateEmployeeRequest,
        CreateFinancialRequest, CreateLeaveRequest, CreateLeaveTypeRequest, CreatePayrollRequest,
        CreateReviewRequest, EmailContact, EmergencyContact, EmployeeDocument, EmployeeOverview,
        EmployeeProfile, EmploymentType, FinancialRequest, FinancialRequestStatus,
        FinancialRequestType, LeaveBalance, LeaveRequest, LeaveRequestStatus, LeaveType,
        PayItem, PayPeriod, PaymentStatus, PayrollPreviewRequest, PayrollRecord,
        PerformanceReview, PersonalInfo, PhoneContact, Priority, ProfileStatus,
        RecordRecoveryRequest, RecoveryOutcome, RegisterAssetRequest, RepaymentType,
        ReviewPeriod, ReviewStatus, SubmitAssetRequest, UpdateAssetRequest,
        UpdateAssetRequestRequest, UpdateEmployeeRequest, UpdateFinancialRequest,
        UpdateLeaveRequest, UpdatePayrollRequest, UpdateReviewRequest, WorkInfo,
    },
    services::payroll::CalculatedPay,
    store::SortDirection,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HR Portal API",
        version = "1.0.0",
        description = "Employee records API built with Rust and Axum. Covers sectioned \
            employee profiles with completeness scoring, payroll records, leave types and \
            balances, salary advances and loans with installment recovery, company assets \
            and performance reviews.",
        license(name = "MIT")
    ),
    paths(
        // Employees
        crate::handlers::employee::create_employee,
        crate::handlers::employee::list_employees,
        crate::handlers::employee::get_employee,
        crate::handlers::employee::update_employee,
        crate::handlers::employee::delete_employee,
        crate::handlers::employee::get_completeness,
        crate::handlers::employee::get_overview,
        // Payroll
        crate::handlers::payroll::preview_payroll,
        crate::handlers::payroll::create_payroll,
        crate::handlers::payroll::list_payroll,
        crate::handlers::payroll::get_payroll,
        crate::handlers::payroll::update_payroll,
        crate::handlers::payroll::delete_payroll,
        // Leave
        crate::handlers::leave::create_leave_type,
        crate::handlers::leave::list_leave_types,
        crate::handlers::leave::delete_leave_type,
        crate::handlers::leave::create_leave_request,
        crate::handlers::leave::list_leave_requests,
        crate::handlers::leave::get_leave_request,
        crate::handlers::leave::update_leave_request,
        crate::handlers::leave::delete_leave_request,
        crate::handlers::leave::get_leave_balances,
        // Financial requests
        crate::handlers::financial::create_financial_request,
        crate::handlers::financial::list_financial_requests,
        crate::handlers::financial::get_financial_request,
        crate::handlers::financial::update_financial_request,
        crate::handlers::financial::delete_financial_request,
        crate::handlers::financial::record_recovery,
        // Assets
        crate::handlers::asset::register_asset,
        crate::handlers::asset::list_assets,
        crate::handlers::asset::get_asset,
        crate::handlers::asset::update_asset,
        crate::handlers::asset::delete_asset,
        crate::handlers::asset::submit_asset_request,
        crate::handlers::asset::list_asset_requests,
        crate::handlers::asset::update_asset_request,
        crate::handlers::asset::delete_asset_request,
        // Reviews
        crate::handlers::review::create_review,
        crate::handlers::review::list_reviews,
        crate::handlers::review::get_review,
        crate::handlers::review::update_review,
        crate::handlers::review::delete_review,
    ),
    components(
        schemas(
            SortDirection,
            PersonalInfo, EmailContact, PhoneContact, Address, ContactInfo, EmploymentType,
            WorkInfo, BankingInfo, EmergencyContact, EmployeeDocument, ProfileStatus,
            EmployeeProfile, CreateEmployeeRequest, UpdateEmployeeRequest,
            CompletenessResponse, EmployeeOverview,
            PayPeriod, PayItem, PaymentStatus, PayrollRecord, CreatePayrollRequest,
            UpdatePayrollRequest, PayrollPreviewRequest, CalculatedPay,
            LeaveType, CreateLeaveTypeRequest, LeaveRequestStatus, LeaveRequest,
            CreateLeaveRequest, UpdateLeaveRequest, LeaveBalance,
            FinancialRequestType, RepaymentType, FinancialRequestStatus, FinancialRequest,
            CreateFinancialRequest, UpdateFinancialRequest, RecordRecoveryRequest,
            RecoveryOutcome,
            AssetStatus, Asset, RegisterAssetRequest, UpdateAssetRequest, Priority,
            AssetRequestStatus, AssetRequest, SubmitAssetRequest, UpdateAssetRequestRequest,
            ReviewPeriod, CompetencyRating, ReviewStatus, PerformanceReview,
            CreateReviewRequest, UpdateReviewRequest,
        )
    ),
    tags(
        (name = "Employees", description = "Sectioned employee profiles and dashboards"),
        (name = "Payroll", description = "Pay period records with computed totals"),
        (name = "Leave", description = "Leave types, requests and balances"),
        (name = "Financial Requests", description = "Advances, loans and their recovery"),
        (name = "Assets", description = "Company equipment and requests for it"),
        (name = "Performance Reviews", description = "Competency ratings per review period"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_recovery_and_overview_paths() {
        let doc = ApiDoc::openapi();
        assert!(
            doc.paths
                .paths
                .contains_key("/api/v1/financial-requests/{request_id}/recoveries")
        );
        assert!(doc.paths.paths.contains_key("/api/v1/employees/{employee_id}/overview"));
    }
}
