// src/handlers/general.rs

use crate::state::AppState;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
};
use serde_json::json;

const ROUTE_GROUPS: &[(&str, &[(&str, &str, &str)])] = &[
    (
        "Employees",
        &[
            ("post", "/api/v1/employees", "Create an employee profile"),
            ("get", "/api/v1/employees", "List employee profiles"),
            ("get", "/api/v1/employees/{id}", "Get a profile"),
            ("patch", "/api/v1/employees/{id}", "Update profile sections"),
            ("delete", "/api/v1/employees/{id}", "Delete a profile"),
            ("get", "/api/v1/employees/{id}/completeness", "Profile completeness score"),
            ("get", "/api/v1/employees/{id}/overview", "Dashboard overview"),
            ("get", "/api/v1/employees/{id}/leave-balances", "Leave balances for a year"),
        ],
    ),
    (
        "Payroll",
        &[
            ("post", "/api/v1/payroll/preview", "Calculate totals without saving"),
            ("post", "/api/v1/payroll", "Create a payroll record"),
            ("get", "/api/v1/payroll", "List payroll records"),
            ("patch", "/api/v1/payroll/{id}", "Update inputs or payment status"),
        ],
    ),
    (
        "Leave",
        &[
            ("post", "/api/v1/leave-types", "Define a leave type"),
            ("post", "/api/v1/leave-requests", "File a leave request"),
            ("patch", "/api/v1/leave-requests/{id}", "Approve or reject"),
        ],
    ),
    (
        "Financial Requests",
        &[
            ("post", "/api/v1/financial-requests", "Request an advance, loan or reimbursement"),
            ("post", "/api/v1/financial-requests/{id}/recoveries", "Record a repayment"),
        ],
    ),
    (
        "Assets & Reviews",
        &[
            ("post", "/api/v1/assets", "Register an asset"),
            ("post", "/api/v1/asset-requests", "Request equipment"),
            ("post", "/api/v1/reviews", "Start a performance review"),
        ],
    ),
];

/// Root handler: HTML landing page listing the main routes
pub async fn root_handler() -> impl IntoResponse {
    let mut groups = String::new();
    for (title, routes) in ROUTE_GROUPS {
        groups.push_str(&format!("<div class=\"route-group\"><h4>{title}</h4>"));
        for (method, path, desc) in routes.iter() {
            groups.push_str(&format!(
                "<div class=\"route-item\"><span class=\"method {method}\">{}</span>\
                 <span class=\"route-path\">{path}</span><span class=\"route-desc\">{desc}</span></div>",
                method.to_uppercase()
            ));
        }
        groups.push_str("</div>");
    }

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <title>HR Portal API</title>
  <style>
    body {{ font-family: system-ui, sans-serif; background: #0f172a; color: #e2e8f0; padding: 40px 20px; }}
    .container {{ max-width: 860px; margin: 0 auto; }}
    a {{ color: #38bdf8; }}
    .route-group h4 {{ text-transform: uppercase; color: #64748b; font-size: 0.8rem; }}
    .route-item {{ display: flex; gap: 12px; padding: 6px 0; }}
    .method {{ font-family: monospace; font-size: 0.7rem; min-width: 52px; text-align: center; border-radius: 4px; }}
    .get {{ background: #064e3b; color: #34d399; }}
    .post {{ background: #1e3a5f; color: #60a5fa; }}
    .patch {{ background: #451a03; color: #fb923c; }}
    .delete {{ background: #4c0519; color: #fb7185; }}
    .route-path {{ font-family: monospace; flex: 1; }}
    .route-desc {{ color: #64748b; font-size: 0.8rem; }}
  </style>
</head>
<body>
<div class="container">
  <h1>HR Portal API</h1>
  <p>Employee profiles, payroll, leave, financial requests, assets and reviews.</p>
  <p><a href="/docs">Swagger UI</a> · <a href="/health">Health</a></p>
  {groups}
</div>
</body>
</html>"#
    ))
}

/// Health check endpoint
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let backend = state.store.backend();
    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "store": backend,
                "address": state.config.server_addr(),
                "service": "hr-portal",
                "version": env!("CARGO_PKG_VERSION"),
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unhealthy",
                "store": backend,
                "error": e.to_string()
            })),
        ),
    }
}
