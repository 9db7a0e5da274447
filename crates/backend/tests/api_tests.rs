//! Интеграционные тесты HTTP API mock-источника продаж

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use backend::{routes::configure_routes, AppState, SalesStore};
use contracts::domain::a030_sales_record::{SalesRecord, SalesResponse};
use serde_json::Value;
use tower::util::ServiceExt; // for `oneshot` method

/// Test helper: router over a static (non-live) store
fn setup_app(records: Vec<SalesRecord>) -> axum::Router {
    configure_routes(AppState::new(SalesStore::new(records, false, 0.0)))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app(Vec::new());
    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_get_sales_returns_series_with_metadata() {
    let app = setup_app(vec![
        SalesRecord::new(2023, 150.0),
        SalesRecord::new(2022, 100.0),
    ]);

    let response = app.oneshot(get("/api/sales")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let parsed: SalesResponse = serde_json::from_value(body.clone()).unwrap();
    assert!(!parsed.is_live);
    assert_eq!(parsed.data.len(), 2);
    assert_eq!(parsed.data[0].year, 2022);
    assert!(body["timestamp"].is_string());
    assert_eq!(body["isLive"], false);
}

#[tokio::test]
async fn test_live_store_reports_live_flag() {
    let store = SalesStore::with_default_fixture(true).unwrap();
    let app = configure_routes(AppState::new(store));

    let response = app.oneshot(get("/api/sales")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["isLive"], true);
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_failing_source_returns_error_body() {
    let app = configure_routes(AppState::new(SalesStore::new(Vec::new(), false, 1.0)));

    let response = app.oneshot(get("/api/sales")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = extract_json(response.into_body()).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_post_empty_object_is_rejected() {
    let app = setup_app(vec![SalesRecord::new(2022, 100.0)]);

    let response = app
        .clone()
        .oneshot(post_json("/api/sales", "{}"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("year"));

    // Запрос не применён
    let response = app.oneshot(get("/api/sales")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_post_missing_sales_is_rejected() {
    let app = setup_app(Vec::new());
    let response = app
        .oneshot(post_json("/api/sales", r#"{"year": 2025}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_post_non_json_body_is_rejected() {
    let app = setup_app(Vec::new());
    let response = app
        .oneshot(post_json("/api/sales", "year=2025&sales=1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_post_repeated_and_unordered_months_are_rejected() {
    let app = setup_app(Vec::new());

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/sales",
            r#"{"year": 2025, "sales": 16, "monthly": [
                {"month": "Feb", "value": 8}, {"month": "Jan", "value": 8}, {"month": "Jan", "value": 1}
            ]}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("out of calendar order"));

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/sales",
            r#"{"year": 2025, "sales": 9, "monthly": [
                {"month": "Jan", "value": 8}, {"month": "Jan", "value": 1}
            ]}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("repeated"));

    // Ни одна из записей не попала в хранилище
    let response = app.oneshot(get("/api/d410/insights")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert!(body.is_null());
}

#[tokio::test]
async fn test_post_ordered_months_feed_insights() {
    let app = setup_app(Vec::new());

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/sales",
            r#"{"year": 2025, "sales": 16, "monthly": [
                {"month": "Jan", "value": 8}, {"month": "Feb", "value": 8}
            ]}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.oneshot(get("/api/d410/insights")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    // Равные значения: выигрывает более ранний месяц
    assert_eq!(body["bestMonth"]["month"], "Jan");
    assert_eq!(body["monthlyTrends"].as_array().unwrap().len(), 2);
    assert_eq!(body["monthlyTrends"][0]["avgValue"], 8.0);
}

#[tokio::test]
async fn test_post_valid_record_is_stored() {
    let app = setup_app(vec![SalesRecord::new(2022, 100.0)]);

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/sales",
            r#"{"year": 2023, "sales": 150, "topProduct": "Gadget"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(post_json("/api/sales", r#"{"year": 2023, "sales": 175}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/api/sales")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[1]["year"], 2023);
    assert_eq!(data[1]["sales"], 175.0);
}

#[tokio::test]
async fn test_insights_endpoint() {
    let app = setup_app(vec![
        SalesRecord::new(2022, 100.0),
        SalesRecord::new(2023, 150.0),
    ]);

    let response = app.oneshot(get("/api/d410/insights")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["totalRevenue"], 250.0);
    assert_eq!(body["avgGrowthRate"], 50.0);
    assert_eq!(body["bestYear"]["year"], 2023);
    assert_eq!(body["worstYear"]["year"], 2022);
}

#[tokio::test]
async fn test_insights_endpoint_empty_store() {
    let app = setup_app(Vec::new());
    let response = app.oneshot(get("/api/d410/insights")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert!(body.is_null());
}
