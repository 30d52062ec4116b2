// src/routes/mod.rs

use crate::{
    handlers::{
        asset::{
            delete_asset, delete_asset_request, get_asset, list_asset_requests, list_assets,
            register_asset, submit_asset_request, update_asset, update_asset_request,
        },
        employee::{
            create_employee, delete_employee, get_completeness, get_employee, get_overview,
            list_employees, update_employee,
        },
        financial::{
            create_financial_request, delete_financial_request, get_financial_request,
            list_financial_requests, record_recovery, update_financial_request,
        },
        general::{health_handler, root_handler},
        leave::{
            create_leave_request, create_leave_type, delete_leave_request, delete_leave_type,
            get_leave_balances, get_leave_request, list_leave_requests, list_leave_types,
            update_leave_request,
        },
        payroll::{
            create_payroll, delete_payroll, get_payroll, list_payroll, preview_payroll,
            update_payroll,
        },
        review::{create_review, delete_review, get_review, list_reviews, update_review},
    },
    openapi::ApiDoc,
    state::AppState,
};
use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        // ─── Employees ────────────────────────────────────────
        .route("/employees", post(create_employee).get(list_employees))
        .route(
            "/employees/{employee_id}",
            get(get_employee)
                .patch(update_employee)
                .delete(delete_employee),
        )
        .route(
            "/employees/{employee_id}/completeness",
            get(get_completeness),
        )
        .route("/employees/{employee_id}/overview", get(get_overview))
        .route(
            "/employees/{employee_id}/leave-balances",
            get(get_leave_balances),
        )
        // ─── Payroll ──────────────────────────────────────────
        .route("/payroll/preview", post(preview_payroll))
        .route("/payroll", post(create_payroll).get(list_payroll))
        .route(
            "/payroll/{payroll_id}",
            get(get_payroll).patch(update_payroll).delete(delete_payroll),
        )
        // ─── Leave ────────────────────────────────────────────
        .route(
            "/leave-types",
            post(create_leave_type).get(list_leave_types),
        )
        .route("/leave-types/{leave_type_id}", delete(delete_leave_type))
        .route(
            "/leave-requests",
            post(create_leave_request).get(list_leave_requests),
        )
        .route(
            "/leave-requests/{request_id}",
            get(get_leave_request)
                .patch(update_leave_request)
                .delete(delete_leave_request),
        )
        // ─── Financial Requests ───────────────────────────────
        .route(
            "/financial-requests",
            post(create_financial_request).get(list_financial_requests),
        )
        .route(
            "/financial-requests/{request_id}",
            get(get_financial_request)
                .patch(update_financial_request)
                .delete(delete_financial_request),
        )
        .route(
            "/financial-requests/{request_id}/recoveries",
            post(record_recovery),
        )
        // ─── Assets ───────────────────────────────────────────
        .route("/assets", post(register_asset).get(list_assets))
        .route(
            "/assets/{asset_id}",
            get(get_asset).patch(update_asset).delete(delete_asset),
        )
        .route(
            "/asset-requests",
            post(submit_asset_request).get(list_asset_requests),
        )
        .route(
            "/asset-requests/{request_id}",
            patch(update_asset_request).delete(delete_asset_request),
        )
        // ─── Performance Reviews ──────────────────────────────
        .route("/reviews", post(create_review).get(list_reviews))
        .route(
            "/reviews/{review_id}",
            get(get_review).patch(update_review).delete(delete_review),
        )
}

/// Full application router: landing page, health, versioned API and docs.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .nest("/api/v1", api_routes())
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
