use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use async_trait::async_trait;
use hr_portal::{
    config::Config,
    routes::app,
    state::AppState,
    store::{
        Document, DocumentStore, MemoryStore, Query, StoreError, StoreResult, StoredDocument,
    },
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::{str::FromStr, sync::Arc};
use tower::ServiceExt;

fn test_app() -> Router {
    app_with_store(MemoryStore::default())
}

fn app_with_store(store: impl DocumentStore + 'static) -> Router {
    app(AppState::new(Arc::new(store), Config::default()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    List,
    Update,
}

/// Memory store whose `op` on one collection always fails like a lost
/// database connection.
struct FlakyStore {
    inner: MemoryStore,
    collection: &'static str,
    op: Op,
}

impl FlakyStore {
    fn new(collection: &'static str, op: Op) -> Self {
        Self {
            inner: MemoryStore::default(),
            collection,
            op,
        }
    }

    fn check(&self, collection: &str, op: Op) -> StoreResult<()> {
        if collection == self.collection && op == self.op {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for FlakyStore {
    async fn list(&self, collection: &str, query: &Query) -> StoreResult<Vec<StoredDocument>> {
        self.check(collection, Op::List)?;
        self.inner.list(collection, query).await
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<StoredDocument>> {
        self.inner.get(collection, id).await
    }

    async fn create(&self, collection: &str, data: Document) -> StoreResult<String> {
        self.inner.create(collection, data).await
    }

    async fn update(&self, collection: &str, id: &str, patch: Document) -> StoreResult<()> {
        self.check(collection, Op::Update)?;
        self.inner.update(collection, id, patch).await
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<bool> {
        self.inner.delete(collection, id).await
    }

    async fn ping(&self) -> StoreResult<()> {
        self.inner.ping().await
    }

    fn backend(&self) -> &'static str {
        "flaky"
    }
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .expect("valid request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn dec(value: &Value) -> Decimal {
    match value {
        Value::String(s) => Decimal::from_str(s).expect("decimal string"),
        other => Decimal::from_str(&other.to_string()).expect("decimal number"),
    }
}

async fn create_employee(app: &Router) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/employees",
        Some(json!({ "personal_info": { "first_name": "Ada", "last_name": "Obi" } })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {body}");
    body["id"].as_str().expect("generated id").to_string()
}

#[tokio::test]
async fn health_reports_memory_backend() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"], "memory");
    assert_eq!(body["address"], "127.0.0.1:3000");
}

#[tokio::test]
async fn new_profile_with_names_only_is_twenty_percent_complete() {
    let app = test_app();
    let id = create_employee(&app).await;

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/v1/employees/{id}/completeness"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["completeness"], 20);

    let (_, profile) = send(&app, Method::GET, &format!("/api/v1/employees/{id}"), None).await;
    assert_eq!(profile["id"], id.as_str());
    assert_eq!(profile["profile_status"]["completeness"], 20);
}

#[tokio::test]
async fn updating_sections_raises_completeness_and_keeps_other_sections() {
    let app = test_app();
    let id = create_employee(&app).await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/employees/{id}"),
        Some(json!({
            "work_info": { "position": "Engineer", "department": "Platform" },
            "contact_info": { "emails": [{ "address": "ada@example.com", "is_primary": true }] }
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "unexpected body: {body}");
    assert_eq!(body["personal_info"]["first_name"], "Ada");
    assert_eq!(body["work_info"]["department"], "Platform");
    assert!(body["profile_status"]["completeness"].as_u64().unwrap_or(0) > 20);
}

#[tokio::test]
async fn employee_without_last_name_is_rejected() {
    let app = test_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/employees",
        Some(json!({ "personal_info": { "first_name": "Ada" } })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 400);
}

#[tokio::test]
async fn unknown_records_return_not_found() {
    let app = test_app();

    let (status, _) = send(&app, Method::GET, "/api/v1/employees/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::PATCH,
        "/api/v1/assets/missing",
        Some(json!({ "status": "retired" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/api/v1/reviews/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn leave_balance_counts_approved_as_used_and_pending_separately() {
    let app = test_app();
    let employee = create_employee(&app).await;

    let (_, leave_type) = send(
        &app,
        Method::POST,
        "/api/v1/leave-types",
        Some(json!({ "name": "Annual", "max_days": 20, "paid": true })),
    )
    .await;
    let leave_type_id = leave_type["id"].as_str().expect("leave type id").to_string();

    let (status, approved) = send(
        &app,
        Method::POST,
        "/api/v1/leave-requests",
        Some(json!({
            "employee_id": employee,
            "leave_type_id": leave_type_id,
            "start_date": "2025-03-03",
            "end_date": "2025-03-10"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {approved}");
    assert_eq!(dec(&approved["total_days"]), Decimal::from(8));

    let approved_id = approved["id"].as_str().expect("request id");
    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/leave-requests/{approved_id}"),
        Some(json!({ "status": "approved" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    send(
        &app,
        Method::POST,
        "/api/v1/leave-requests",
        Some(json!({
            "employee_id": employee,
            "leave_type_id": leave_type_id,
            "start_date": "2025-07-01",
            "end_date": "2025-07-02"
        })),
    )
    .await;

    let (status, balances) = send(
        &app,
        Method::GET,
        &format!("/api/v1/employees/{employee}/leave-balances?year=2025"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let balance = &balances[0];
    assert_eq!(dec(&balance["total_entitlement"]), Decimal::from(20));
    assert_eq!(dec(&balance["used"]), Decimal::from(8));
    assert_eq!(dec(&balance["pending"]), Decimal::from(2));
    assert_eq!(dec(&balance["remaining"]), Decimal::from(10));
}

#[tokio::test]
async fn leave_request_with_reversed_dates_is_rejected() {
    let app = test_app();
    let employee = create_employee(&app).await;
    let (_, leave_type) = send(
        &app,
        Method::POST,
        "/api/v1/leave-types",
        Some(json!({ "name": "Sick", "max_days": 10 })),
    )
    .await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/leave-requests",
        Some(json!({
            "employee_id": employee,
            "leave_type_id": leave_type["id"],
            "start_date": "2025-03-10",
            "end_date": "2025-03-03"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn installment_loan_is_split_evenly_and_full_repayment_is_one_month() {
    let app = test_app();
    let employee = create_employee(&app).await;

    let (status, loan) = send(
        &app,
        Method::POST,
        "/api/v1/financial-requests",
        Some(json!({
            "employee_id": employee,
            "request_type": "loan",
            "amount": 1000,
            "repayment_type": "installments",
            "installment_months": 4
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {loan}");
    assert_eq!(loan["installment_months"], 4);
    assert_eq!(dec(&loan["installment_amount"]), Decimal::from(250));
    assert_eq!(dec(&loan["remaining_balance"]), Decimal::from(1000));
    assert_eq!(loan["status"], "pending");

    let (status, advance) = send(
        &app,
        Method::POST,
        "/api/v1/financial-requests",
        Some(json!({
            "employee_id": employee,
            "request_type": "advance",
            "amount": 500,
            "repayment_type": "full"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(advance["installment_months"], 1);
    assert_eq!(dec(&advance["installment_amount"]), Decimal::from(500));
}

#[tokio::test]
async fn installments_without_a_month_count_are_rejected() {
    let app = test_app();
    let employee = create_employee(&app).await;

    for months in [json!(null), json!(0)] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/financial-requests",
            Some(json!({
                "employee_id": employee,
                "request_type": "loan",
                "amount": 1000,
                "repayment_type": "installments",
                "installment_months": months
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn payroll_totals_are_computed_on_create_and_preview() {
    let app = test_app();
    let employee = create_employee(&app).await;
    let inputs = json!({
        "base_salary": 3000,
        "overtime": 200,
        "bonuses": 100,
        "allowances": [{ "label": "Transport", "amount": 150 }],
        "deductions": [{ "label": "Tax", "amount": 450 }, { "label": "Pension", "amount": 50 }]
    });

    let (status, preview) = send(&app, Method::POST, "/api/v1/payroll/preview", Some(inputs.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dec(&preview["gross_pay"]), Decimal::from(3450));
    assert_eq!(dec(&preview["total_deductions"]), Decimal::from(500));
    assert_eq!(dec(&preview["net_pay"]), Decimal::from(2950));

    let mut body = inputs;
    body["employee_id"] = json!(employee);
    body["pay_period"] = json!({ "start": "2025-03-01", "end": "2025-03-31" });
    let (status, record) = send(&app, Method::POST, "/api/v1/payroll", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {record}");
    assert_eq!(dec(&record["net_pay"]), Decimal::from(2950));
    assert_eq!(record["payment_status"], "pending");

    let id = record["id"].as_str().expect("payroll id");
    let (status, updated) = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/payroll/{id}"),
        Some(json!({ "bonuses": 0, "payment_status": "approved" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dec(&updated["gross_pay"]), Decimal::from(3350));
    assert_eq!(updated["payment_status"], "approved");
}

#[tokio::test]
async fn negative_payroll_amounts_are_rejected() {
    let app = test_app();
    let employee = create_employee(&app).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/payroll",
        Some(json!({
            "employee_id": employee,
            "pay_period": { "start": "2025-03-01", "end": "2025-03-31" },
            "base_salary": -1
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn recovery_updates_balance_and_adds_payroll_deduction() {
    let app = test_app();
    let employee = create_employee(&app).await;

    let (_, loan) = send(
        &app,
        Method::POST,
        "/api/v1/financial-requests",
        Some(json!({
            "employee_id": employee,
            "request_type": "loan",
            "amount": 1000,
            "repayment_type": "installments",
            "installment_months": 4
        })),
    )
    .await;
    let loan_id = loan["id"].as_str().expect("loan id").to_string();

    let (_, payroll) = send(
        &app,
        Method::POST,
        "/api/v1/payroll",
        Some(json!({
            "employee_id": employee,
            "pay_period": { "start": "2025-04-01", "end": "2025-04-30" },
            "base_salary": 3000
        })),
    )
    .await;
    let payroll_id = payroll["id"].as_str().expect("payroll id").to_string();

    let (status, outcome) = send(
        &app,
        Method::POST,
        &format!("/api/v1/financial-requests/{loan_id}/recoveries"),
        Some(json!({ "amount": 250, "payroll_record_id": payroll_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "unexpected body: {outcome}");
    assert_eq!(outcome["settled"], false);
    assert_eq!(
        dec(&outcome["financial_request"]["remaining_balance"]),
        Decimal::from(750)
    );

    let deductions = outcome["payroll_record"]["deductions"]
        .as_array()
        .expect("deductions");
    assert_eq!(deductions.len(), 1);
    assert_eq!(deductions[0]["financial_request_id"], loan_id.as_str());
    assert_eq!(dec(&outcome["payroll_record"]["net_pay"]), Decimal::from(2750));

    let (_, outcome) = send(
        &app,
        Method::POST,
        &format!("/api/v1/financial-requests/{loan_id}/recoveries"),
        Some(json!({ "amount": 750 })),
    )
    .await;
    assert_eq!(outcome["settled"], true);
    assert_eq!(outcome["financial_request"]["status"], "completed");
    assert!(outcome["payroll_record"].is_null());
}

#[tokio::test]
async fn recovery_against_unknown_payroll_record_changes_nothing() {
    let app = test_app();
    let employee = create_employee(&app).await;
    let (_, advance) = send(
        &app,
        Method::POST,
        "/api/v1/financial-requests",
        Some(json!({
            "employee_id": employee,
            "request_type": "advance",
            "amount": 500,
            "repayment_type": "full"
        })),
    )
    .await;
    let id = advance["id"].as_str().expect("advance id");

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/v1/financial-requests/{id}/recoveries"),
        Some(json!({ "amount": 100, "payroll_record_id": "missing" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, stored) = send(
        &app,
        Method::GET,
        &format!("/api/v1/financial-requests/{id}"),
        None,
    )
    .await;
    assert_eq!(dec(&stored["remaining_balance"]), Decimal::from(500));
}

#[tokio::test]
async fn overview_gathers_every_section_for_an_employee() {
    let app = test_app();
    let employee = create_employee(&app).await;
    let other = create_employee(&app).await;

    send(
        &app,
        Method::POST,
        "/api/v1/leave-types",
        Some(json!({ "name": "Annual", "max_days": 20 })),
    )
    .await;
    for (owner, amount) in [(&employee, 1000), (&employee, 300), (&other, 999)] {
        send(
            &app,
            Method::POST,
            "/api/v1/financial-requests",
            Some(json!({
                "employee_id": owner,
                "request_type": "loan",
                "amount": amount,
                "repayment_type": "full"
            })),
        )
        .await;
    }
    send(
        &app,
        Method::POST,
        "/api/v1/payroll",
        Some(json!({
            "employee_id": employee,
            "pay_period": { "start": "2025-03-01", "end": "2025-03-31" },
            "base_salary": 3000
        })),
    )
    .await;

    let (status, overview) = send(
        &app,
        Method::GET,
        &format!("/api/v1/employees/{employee}/overview?year=2025"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(overview["completeness"], 20);
    assert_eq!(overview["profile"]["id"], employee.as_str());
    assert_eq!(overview["leave_balances"].as_array().map(Vec::len), Some(1));
    assert_eq!(overview["payroll_records"].as_array().map(Vec::len), Some(1));
    assert_eq!(overview["financial_requests"].as_array().map(Vec::len), Some(2));
    assert_eq!(dec(&overview["outstanding_balance"]), Decimal::from(1300));
}

#[tokio::test]
async fn overview_of_unknown_employee_is_empty_rather_than_an_error() {
    let app = test_app();
    let (status, overview) = send(&app, Method::GET, "/api/v1/employees/nobody/overview", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(overview["profile"].is_null());
    assert_eq!(overview["completeness"], 0);
    assert_eq!(overview["payroll_records"], json!([]));
}

#[tokio::test]
async fn list_filters_by_employee_and_sorts_on_request() {
    let app = test_app();
    let employee = create_employee(&app).await;
    let other = create_employee(&app).await;

    for (owner, name) in [(&employee, "Laptop"), (&other, "Badge"), (&employee, "Chair")] {
        send(
            &app,
            Method::POST,
            "/api/v1/assets",
            Some(json!({ "name": name, "category": "equipment", "assigned_to": owner })),
        )
        .await;
    }

    let (status, assets) = send(
        &app,
        Method::GET,
        &format!("/api/v1/assets?employee_id={employee}&order_by=name&direction=asc"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = assets
        .as_array()
        .expect("asset list")
        .iter()
        .filter_map(|a| a["name"].as_str())
        .collect();
    assert_eq!(names, ["Chair", "Laptop"]);
    assert_eq!(assets[0]["status"], "assigned");

    let (status, _) = send(&app, Method::GET, "/api/v1/assets?order_by=name;drop", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn review_overall_rating_is_mean_of_scores() {
    let app = test_app();
    let employee = create_employee(&app).await;

    let (status, review) = send(
        &app,
        Method::POST,
        "/api/v1/reviews",
        Some(json!({
            "employee_id": employee,
            "reviewer_id": "mgr-1",
            "period": { "start": "2025-01-01", "end": "2025-06-30" },
            "ratings": [
                { "competency": "Delivery", "score": 4 },
                { "competency": "Teamwork", "score": 5 }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {review}");
    assert_eq!(dec(&review["overall_rating"]), Decimal::from_str("4.5").unwrap());
    assert_eq!(review["status"], "draft");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/reviews",
        Some(json!({
            "employee_id": employee,
            "reviewer_id": "mgr-1",
            "period": { "start": "2025-01-01", "end": "2025-06-30" },
            "ratings": [{ "competency": "Delivery", "score": 9 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn preview_with_totals_beyond_decimal_range_is_a_validation_error() {
    let app = test_app();
    let max = Decimal::MAX.to_string();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/payroll/preview",
        Some(json!({ "base_salary": max, "overtime": max })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "unexpected body: {body}");
    assert_eq!(body["error"]["code"], 400);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/payroll/preview",
        Some(json!({ "base_salary": max })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dec(&body["net_pay"]), Decimal::MAX);
}

#[tokio::test]
async fn recovery_overflowing_the_recovered_total_is_rejected() {
    let app = test_app();
    let employee = create_employee(&app).await;
    let max = Decimal::MAX.to_string();

    let (status, loan) = send(
        &app,
        Method::POST,
        "/api/v1/financial-requests",
        Some(json!({
            "employee_id": employee,
            "request_type": "loan",
            "amount": max,
            "repayment_type": "full"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {loan}");
    let id = loan["id"].as_str().expect("loan id");
    let uri = format!("/api/v1/financial-requests/{id}/recoveries");

    let (status, _) = send(&app, Method::POST, &uri, Some(json!({ "amount": max }))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::POST, &uri, Some(json!({ "amount": max }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, stored) = send(&app, Method::GET, &format!("/api/v1/financial-requests/{id}"), None).await;
    assert_eq!(dec(&stored["amount_recovered"]), Decimal::MAX);
}

#[tokio::test]
async fn sorting_by_a_money_field_uses_numeric_order() {
    let app = test_app();
    let employee = create_employee(&app).await;

    for amount in ["1000", "250", "90"] {
        send(
            &app,
            Method::POST,
            "/api/v1/financial-requests",
            Some(json!({
                "employee_id": employee,
                "request_type": "advance",
                "amount": amount,
                "repayment_type": "full"
            })),
        )
        .await;
    }

    for (direction, expected) in [("asc", [90, 250, 1000]), ("desc", [1000, 250, 90])] {
        let (status, requests) = send(
            &app,
            Method::GET,
            &format!("/api/v1/financial-requests?order_by=amount&direction={direction}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let amounts: Vec<Decimal> = requests
            .as_array()
            .expect("request list")
            .iter()
            .map(|r| dec(&r["amount"]))
            .collect();
        assert_eq!(amounts, expected.map(Decimal::from));
    }
}

#[tokio::test]
async fn overview_shows_failed_section_as_empty() {
    let app = app_with_store(FlakyStore::new("payroll", Op::List));
    let employee = create_employee(&app).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/payroll",
        Some(json!({
            "employee_id": employee,
            "pay_period": { "start": "2025-03-01", "end": "2025-03-31" },
            "base_salary": 3000
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    send(
        &app,
        Method::POST,
        "/api/v1/financial-requests",
        Some(json!({
            "employee_id": employee,
            "request_type": "loan",
            "amount": 400,
            "repayment_type": "full"
        })),
    )
    .await;

    let (status, overview) = send(
        &app,
        Method::GET,
        &format!("/api/v1/employees/{employee}/overview"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "unexpected body: {overview}");
    assert_eq!(overview["payroll_records"], json!([]));
    assert_eq!(overview["profile"]["id"], employee.as_str());
    assert_eq!(overview["financial_requests"].as_array().map(Vec::len), Some(1));
    assert_eq!(dec(&overview["outstanding_balance"]), Decimal::from(400));

    let (status, _) = send(&app, Method::GET, "/api/v1/payroll", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn failed_payroll_write_keeps_the_recorded_recovery() {
    let app = app_with_store(FlakyStore::new("payroll", Op::Update));
    let employee = create_employee(&app).await;

    let (_, loan) = send(
        &app,
        Method::POST,
        "/api/v1/financial-requests",
        Some(json!({
            "employee_id": employee,
            "request_type": "loan",
            "amount": 1000,
            "repayment_type": "installments",
            "installment_months": 4
        })),
    )
    .await;
    let loan_id = loan["id"].as_str().expect("loan id").to_string();

    let (_, payroll) = send(
        &app,
        Method::POST,
        "/api/v1/payroll",
        Some(json!({
            "employee_id": employee,
            "pay_period": { "start": "2025-04-01", "end": "2025-04-30" },
            "base_salary": 3000
        })),
    )
    .await;
    let payroll_id = payroll["id"].as_str().expect("payroll id").to_string();

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/v1/financial-requests/{loan_id}/recoveries"),
        Some(json!({ "amount": 250, "payroll_record_id": payroll_id })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], 500);

    let (_, stored) = send(
        &app,
        Method::GET,
        &format!("/api/v1/financial-requests/{loan_id}"),
        None,
    )
    .await;
    assert_eq!(dec(&stored["amount_recovered"]), Decimal::from(250));
    assert_eq!(dec(&stored["remaining_balance"]), Decimal::from(750));

    let (_, payroll) = send(&app, Method::GET, &format!("/api/v1/payroll/{payroll_id}"), None).await;
    assert_eq!(payroll["deductions"], json!([]));
    assert_eq!(dec(&payroll["net_pay"]), Decimal::from(3000));
}
