#![allow(dead_code)]

use axum::http::StatusCode;
use fxledger::api::{self, AppState};
use fxledger::domain::{AmountBounds, ExchangeRate};
use fxledger::{Config, Currency, Decimal, MockExchangeApi, Order};
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt;

pub const TOKEN: &str = "test-token";

pub fn d(s: &str) -> Decimal {
    Decimal::from_str_canonical(s).unwrap()
}

pub fn test_config() -> Config {
    Config {
        port: 0,
        api_base_url: "http://example.invalid".to_string(),
        upstream_timeout: Duration::from_secs(1),
        forex_amount_bounds: AmountBounds {
            min: None,
            max: Some(Decimal::from(1_000_000)),
        },
    }
}

pub fn app(mock: MockExchangeApi) -> axum::Router {
    api::create_router(AppState::new(test_config(), Arc::new(mock)))
}

pub fn order(
    id: i64,
    from: &str,
    from_amount: &str,
    to: &str,
    to_amount: &str,
    rate: &str,
    at: &str,
) -> Order {
    Order {
        order_id: id,
        from_currency: Currency::new(from),
        from_amount: d(from_amount),
        to_currency: Currency::new(to),
        to_amount: d(to_amount),
        applied_rate: d(rate),
        ordered_at: at.parse().unwrap(),
    }
}

pub fn rate(id: i64, currency: &str, rate: &str) -> ExchangeRate {
    ExchangeRate {
        exchange_rate_id: id,
        currency: Currency::new(currency),
        rate: d(rate),
        change_percentage: d("0.5"),
        apply_date_time: "2025-03-01T10:00:00".to_string(),
    }
}

pub async fn send(
    app: axum::Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = axum::http::Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let req = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(axum::body::Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(axum::body::Body::empty()).unwrap(),
    };

    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

/// Send a raw (possibly malformed) JSON body.
pub async fn send_raw(
    app: axum::Router,
    uri: &str,
    token: Option<&str>,
    body: &str,
) -> (StatusCode, serde_json::Value) {
    let mut builder = axum::http::Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let req = builder.body(axum::body::Body::from(body.to_string())).unwrap();

    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

pub async fn get(app: axum::Router, uri: &str, token: Option<&str>) -> (StatusCode, serde_json::Value) {
    send(app, "GET", uri, token, None).await
}
