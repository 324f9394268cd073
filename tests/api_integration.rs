//! Integration tests for the assembled HTTP API.
//!
//! These tests drive `api_router` end to end with in-memory adapters:
//! 1. Reference data is seeded from YAML the same way the server does it
//! 2. Ad-hoc calculations pick up geographic factors and fee bands
//! 3. Plans derive ages and supply entry defaults
//! 4. Entries priced from reference data roll up into plan totals

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tower::ServiceExt;

use lifecare_cost::adapters::{
    api_router, readers_from_seed, ApiState, InMemoryCarePlanEntryRepository,
    InMemoryLifeCarePlanRepository, ReferenceDataSeed,
};
use lifecare_cost::application::handlers::costing::ItemPricer;

// =============================================================================
// Test Infrastructure
// =============================================================================

const SEED: &str = r#"
fee_schedules:
  - code: "97110"
    description: Therapeutic exercise
    mfu_50th: 40
    mfu_75th: 60
    mfu_90th: 75
    pfr_50th: 80
    pfr_75th: 100
  - code: "00000"
    description: Placeholder without bands
geo_factors:
  - zip: "10001"
    city: New York
    state_name: NY
    mfr_code: 1.1
    pfr_code: 1.2
"#;

fn app() -> Router {
    let seed = ReferenceDataSeed::from_yaml(SEED).unwrap();
    let (fees, geo) = readers_from_seed(seed);
    let fee_reader = Arc::new(fees);
    let geo_reader = Arc::new(geo);
    let pricer = ItemPricer::new(geo_reader.clone(), fee_reader.clone());
    api_router(ApiState::new(
        Arc::new(InMemoryLifeCarePlanRepository::new()),
        Arc::new(InMemoryCarePlanEntryRepository::new()),
        geo_reader,
        fee_reader,
        pricer,
    ))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn decimal(value: &Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn years_ago(years: u32) -> String {
    chrono::Utc::now()
        .date_naive()
        .checked_sub_months(chrono::Months::new(years * 12))
        .unwrap()
        .to_string()
}

/// Opens a plan for a 40-year-old in ZIP 10001 and returns its ID.
async fn open_plan(app: &Router) -> String {
    let body = json!({
        "first_name": "Jordan",
        "last_name": "Reyes",
        "date_of_birth": years_ago(40),
        "date_of_injury": years_ago(2),
        "zip_code": "10001",
        "city": "New York",
        "state": "NY",
        "life_expectancy": "38.5"
    });
    let (status, created) = send(app, "POST", "/api/plans", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    created["plan"]["id"].as_str().unwrap().to_string()
}

fn therapy_entry() -> Value {
    json!({
        "category": "therapyFollowUp",
        "item": "Physical therapy",
        "frequency": "12x per year",
        "cpt_code": "97110",
        "start_age": 40,
        "end_age": 50,
        "zip_code": "10001"
    })
}

fn surgery_entry() -> Value {
    json!({
        "category": "surgical",
        "item": "Knee replacement",
        "frequency": "one-time",
        "start_age": 40,
        "end_age": 41,
        "is_one_time": true,
        "base_rate": "5000",
        "zip_code": "10001"
    })
}

// =============================================================================
// Health and reference data
// =============================================================================

#[tokio::test]
async fn health_reports_ok() {
    let app = app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn geo_factor_lookup_ignores_plus_four_suffix() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/reference/geo-factors/10001-1234", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["zip"], "10001");
    assert_eq!(body["found"], true);
    assert_eq!(decimal(&body["mfr_factor"]), d("1.1"));
    assert_eq!(decimal(&body["pfr_factor"]), d("1.2"));
    assert_eq!(body["city"], "New York");
}

#[tokio::test]
async fn unknown_zip_returns_neutral_factors() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/reference/geo-factors/99999", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["found"], false);
    assert_eq!(decimal(&body["mfr_factor"]), Decimal::ONE);
    assert_eq!(decimal(&body["pfr_factor"]), Decimal::ONE);
}

#[tokio::test]
async fn fee_schedule_lookup_returns_bands() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/reference/fee-schedules/97110", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["has_bands"], true);
    assert_eq!(decimal(&body["mfu"]["p50"]), d("40"));
    assert_eq!(decimal(&body["mfu"]["p90"]), d("75"));
    assert!(body["pfr"]["p90"].is_null());

    let (status, body) = send(&app, "GET", "/api/reference/fee-schedules/00000", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["has_bands"], false);
}

#[tokio::test]
async fn unknown_fee_schedule_is_not_found() {
    let app = app();
    let (status, _) = send(&app, "GET", "/api/reference/fee-schedules/12345", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Ad-hoc calculations
// =============================================================================

#[tokio::test]
async fn calculation_applies_zip_factors_to_base_rate() {
    let app = app();
    let request = json!({
        "base_rate": "100",
        "frequency": "1x per year 1 year",
        "zip_code": "10001"
    });

    let (status, body) = send(&app, "POST", "/api/calculations", Some(request)).await;

    assert_eq!(status, StatusCode::OK);
    // mean(1.1, 1.2) = 1.15
    assert_eq!(decimal(&body["per_occurrence"]["average"]), d("115"));
    assert_eq!(decimal(&body["lifetime"]), d("115"));
    assert_eq!(body["geo_factors"]["found"], true);
    assert_eq!(body["geo_factors"]["display"], "MFR 1.1000 / PFR 1.2000");
}

#[tokio::test]
async fn calculation_prices_fee_bands_with_geo_factors() {
    let app = app();
    let request = json!({
        "frequency": "12x per year",
        "cpt_code": "97110",
        "zip_code": "10001",
        "start_age": 40,
        "end_age": 50
    });

    let (status, body) = send(&app, "POST", "/api/calculations", Some(request)).await;

    assert_eq!(status, StatusCode::OK);
    // low = mean(40*1.1, 80*1.2) = 70, high = mean(60*1.1, 100*1.2) = 93
    assert_eq!(decimal(&body["per_occurrence"]["low"]), d("70"));
    assert_eq!(decimal(&body["per_occurrence"]["high"]), d("93"));
    assert_eq!(decimal(&body["annual"]), d("978"));
    assert_eq!(decimal(&body["low"]), d("8400"));
    assert_eq!(decimal(&body["average"]), d("9780"));
    assert_eq!(decimal(&body["high"]), d("11160"));
    assert_eq!(body["fee_schedule_code"], "97110");
    assert_eq!(body["duration"]["source"], "age_range");
}

#[tokio::test]
async fn manual_factors_override_zip_lookup() {
    let app = app();
    let request = json!({
        "base_rate": "100",
        "frequency": "one-time",
        "zip_code": "10001",
        "mfr_factor": "0.982",
        "pfr_factor": "1.0"
    });

    let (status, body) = send(&app, "POST", "/api/calculations", Some(request)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_one_time"], true);
    assert_eq!(decimal(&body["annual"]), Decimal::ZERO);
    assert_eq!(decimal(&body["lifetime"]), d("99.10"));
}

#[tokio::test]
async fn out_of_range_manual_factor_is_rejected() {
    let app = app();
    let request = json!({
        "base_rate": "100",
        "frequency": "1x per year",
        "mfr_factor": "7"
    });

    let (status, body) = send(&app, "POST", "/api/calculations", Some(request)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

// =============================================================================
// Care plan entries and totals
// =============================================================================

#[tokio::test]
async fn entries_priced_from_reference_data_roll_up_into_totals() {
    let app = app();
    let plan_id = open_plan(&app).await;
    let entries_uri = format!("/api/plans/{}/entries", plan_id);

    let (status, therapy) = send(&app, "POST", &entries_uri, Some(therapy_entry())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(decimal(&therapy["entry"]["min_cost"]), d("70"));
    assert_eq!(decimal(&therapy["entry"]["max_cost"]), d("93"));
    assert_eq!(decimal(&therapy["entry"]["annual_cost"]), d("978"));
    assert_eq!(decimal(&therapy["entry"]["lifetime_cost"]), d("9780"));
    assert_eq!(decimal(&therapy["entry"]["mfr_adjusted"]), d("1.1"));

    let (status, surgery) = send(&app, "POST", &entries_uri, Some(surgery_entry())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(decimal(&surgery["entry"]["annual_cost"]), Decimal::ZERO);
    assert_eq!(decimal(&surgery["entry"]["lifetime_cost"]), d("5750"));

    let (status, list) = send(&app, "GET", &entries_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["total"], 2);

    let (status, totals) = send(&app, "GET", &format!("/api/plans/{}/totals", plan_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(totals["entry_count"], 2);
    assert_eq!(decimal(&totals["annual"]), d("978"));
    assert_eq!(decimal(&totals["one_time"]), d("5750"));
    assert_eq!(decimal(&totals["lifetime"]["low"]), d("14150"));
    assert_eq!(decimal(&totals["lifetime"]["average"]), d("15530"));
    assert_eq!(decimal(&totals["lifetime"]["high"]), d("16910"));
}

#[tokio::test]
async fn deleting_an_entry_removes_it_from_totals() {
    let app = app();
    let plan_id = open_plan(&app).await;
    let entries_uri = format!("/api/plans/{}/entries", plan_id);

    send(&app, "POST", &entries_uri, Some(therapy_entry())).await;
    let (_, surgery) = send(&app, "POST", &entries_uri, Some(surgery_entry())).await;
    let surgery_id = surgery["entry"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(&app, "DELETE", &format!("/api/entries/{}", surgery_id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, totals) = send(&app, "GET", &format!("/api/plans/{}/totals", plan_id), None).await;
    assert_eq!(totals["entry_count"], 1);
    assert_eq!(decimal(&totals["one_time"]), Decimal::ZERO);
    assert_eq!(decimal(&totals["lifetime"]["average"]), d("9780"));

    let (status, _) = send(&app, "GET", &format!("/api/entries/{}", surgery_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn plan_reports_ages_derived_from_dates() {
    let app = app();
    let plan_id = open_plan(&app).await;

    let (status, plan) = send(&app, "GET", &format!("/api/plans/{}", plan_id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(plan["full_name"], "Jordan Reyes");
    assert_eq!(plan["age_today"], 40);
    assert_eq!(plan["age_at_injury"], 38);
    assert_eq!(decimal(&plan["projected_age_at_death"]), d("78.5"));
}

#[tokio::test]
async fn entry_defaults_come_from_the_plan() {
    let app = app();
    let plan_id = open_plan(&app).await;
    let body = json!({
        "category": "therapyFollowUp",
        "item": "Physical therapy",
        "frequency": "12x per year",
        "cpt_code": "97110"
    });

    let (status, created) = send(&app, "POST", &format!("/api/plans/{}/entries", plan_id), Some(body)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["entry"]["start_age"], 40);
    // floor(40 + 38.5)
    assert_eq!(created["entry"]["end_age"], 78);
    assert_eq!(created["entry"]["zip_code"], "10001");
    assert_eq!(decimal(&created["entry"]["mfr_adjusted"]), d("1.1"));
    // 978 per year over 38 years
    assert_eq!(decimal(&created["entry"]["lifetime_cost"]), d("37164"));
}

#[tokio::test]
async fn deleting_a_plan_removes_its_entries() {
    let app = app();
    let plan_id = open_plan(&app).await;
    let (_, therapy) = send(&app, "POST", &format!("/api/plans/{}/entries", plan_id), Some(therapy_entry())).await;
    let entry_id = therapy["entry"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(&app, "DELETE", &format!("/api/plans/{}", plan_id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &format!("/api/entries/{}", entry_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "GET", &format!("/api/plans/{}/totals", plan_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn entries_require_an_existing_plan() {
    let app = app();
    let uri = format!("/api/plans/{}/entries", uuid::Uuid::new_v4());

    let (status, body) = send(&app, "POST", &uri, Some(therapy_entry())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].as_str().unwrap().contains("Life care plan"));
}

#[tokio::test]
async fn amounts_beyond_storable_range_are_rejected() {
    let app = app();
    let request = json!({
        "base_rate": "10000000000000000000000",
        "frequency": "999999x per day 100 years"
    });

    let (status, body) = send(&app, "POST", "/api/calculations", Some(request)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "base_rate");
}

#[tokio::test]
async fn entry_without_price_information_is_rejected() {
    let app = app();
    let plan_id = open_plan(&app).await;
    let body = json!({
        "category": "supplies",
        "item": "Gauze",
        "frequency": "12x per year",
        "start_age": 40,
        "end_age": 50
    });

    let (status, body) = send(&app, "POST", &format!("/api/plans/{}/entries", plan_id), Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "base_rate");
}
