//! Integration tests for API endpoints

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use mse_signals::config::Config;
use mse_signals::{app, AppState};
use serde_json::Value;
use tower::ServiceExt;

const HISTORY: &str = "\
Date,Last trade price,Max,Min,Volume,Total turnover in denars
05.01.2024,\"1.250,00\",\"1.260,00\",\"1.240,00\",40,\"50.000,00\"
04.01.2024,\"1.240,00\",\"1.250,00\",\"1.230,00\",30,\"37.200,00\"
03.01.2024,\"1.230,00\",\"1.240,00\",\"1.220,00\",20,\"24.600,00\"
02.01.2024,\"1.220,00\",\"1.230,00\",\"1.210,00\",10,\"12.200,00\"
";

fn test_app() -> Router {
    app(AppState::in_memory(Config::in_memory()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Body) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().method(method).uri(uri).body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, Body::empty()).await
}

async fn upload(app: &Router, code: &str, csv: &str) -> (StatusCode, Value) {
    let uri = format!("/api/stocks/{}/history", code);
    send(app, Method::PUT, &uri, Body::from(csv.to_string())).await
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get(&test_app(), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "memory");
}

#[tokio::test]
async fn test_unknown_stock_is_404() {
    let (status, body) = get(&test_app(), "/api/stocks/NOPE/technical-analysis").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
    assert!(body["error"].as_str().unwrap().contains("NOPE"));
}

#[tokio::test]
async fn test_upload_then_analyze() {
    let app = test_app();

    let (status, body) = upload(&app, "alk", HISTORY).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["code"], "ALK");
    assert_eq!(body["data"]["rows"], 4);

    let (status, body) = get(&app, "/api/stocks/ALK/technical-analysis").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["meta"]["generated_at"].is_string());

    let data = &body["data"];
    assert_eq!(data["code"], "ALK");
    assert_eq!(data["historical_series"].as_array().unwrap().len(), 4);
    assert_eq!(data["historical_series"][0]["date"], "2024-01-02");
    assert_eq!(data["historical_series"][3]["last_trade_price"], 1250.0);

    let day = &data["per_window"]["1d"];
    assert_eq!(day["indicators"]["rsi"], "N/A");
    assert_eq!(day["indicators"]["sma"], serde_json::json!([1250.0]));
    assert_eq!(day["signal"], "Hold");

    let week = &data["per_window"]["1w"];
    assert_eq!(week["indicators"]["macd"], "N/A");
    assert!(week["indicators"]["obv"].is_array());
}

#[tokio::test]
async fn test_fundamental_analysis() {
    let app = test_app();
    upload(&app, "KMB", HISTORY).await;

    let (status, body) = get(&app, "/api/stocks/kmb/fundamental-analysis").await;
    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["volume"]["total"], 100.0);
    assert_eq!(data["volume"]["maximum"], 40.0);
    assert_eq!(data["turnover"]["maximum"], 50000.0);
    assert_eq!(data["average_daily_range"], 20.0);
    assert_eq!(data["price_changes"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_list_and_freshness() {
    let app = test_app();
    upload(&app, "TEL", HISTORY).await;
    upload(&app, "ALK", HISTORY).await;

    let (status, body) = get(&app, "/api/stocks").await;
    assert_eq!(status, StatusCode::OK);
    let stocks = body["data"].as_array().unwrap();
    assert_eq!(stocks.len(), 2);
    assert_eq!(stocks[0]["code"], "ALK");
    assert_eq!(stocks[0]["storage_key"], "Stock_Data/ALK.csv");

    let (status, body) = get(&app, "/api/stocks/freshness").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"]["by_date"]["2024-01-05"],
        serde_json::json!(["ALK", "TEL"])
    );
    assert!(body["data"]["errors"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_bad_uploads_are_400() {
    let app = test_app();

    let (status, _) = upload(&app, "ALK", "   ").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = upload(&app, "ALK", "Price,Volume\n1,2\n").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Date"));

    let (status, _) = get(&app, "/api/stocks/ALK/technical-analysis").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
