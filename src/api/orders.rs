use crate::api::{bearer_token, AppState};
use crate::domain::{CreateOrderRequest, Order, Quote, QuoteRequest};
use crate::error::AppError;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Serialize)]
pub struct OrdersResponse {
    pub orders: Vec<Order>,
}

pub async fn get_orders(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<OrdersResponse>, AppError> {
    let token = bearer_token(&headers)?;
    let orders = state.exchange.fetch_orders(&token).await?;
    Ok(Json(OrdersResponse { orders }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteQuery {
    pub from_currency: Option<String>,
    pub to_currency: Option<String>,
    pub forex_amount: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub quote: Quote,
}

/// Input is validated before anything is sent upstream.
pub async fn get_quote(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<QuoteQuery>, QueryRejection>,
) -> Result<Json<QuoteResponse>, AppError> {
    let token = bearer_token(&headers)?;
    let Query(params) = query.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let request = QuoteRequest::parse(
        params.from_currency.as_deref().unwrap_or_default(),
        params.to_currency.as_deref().unwrap_or_default(),
        params.forex_amount.as_deref().unwrap_or_default(),
        state.config.forex_amount_bounds,
    )?;

    let quote = state.exchange.fetch_quote(&token, &request).await?;
    Ok(Json(QuoteResponse { quote }))
}

/// `forexAmount` as sent by clients: a JSON number or a numeric string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(serde_json::Number),
    Text(String),
}

impl AmountInput {
    fn as_text(&self) -> String {
        match self {
            AmountInput::Number(n) => n.to_string(),
            AmountInput::Text(s) => s.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderBody {
    pub exchange_rate_id: i64,
    pub from_currency: String,
    pub to_currency: String,
    pub forex_amount: AmountInput,
}

#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub order: Order,
}

/// The token is checked before the body, so an anonymous caller always gets 401.
pub async fn create_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CreateOrderBody>, JsonRejection>,
) -> Result<Json<CreateOrderResponse>, AppError> {
    let token = bearer_token(&headers)?;
    let Json(body) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let request = CreateOrderRequest::parse(
        body.exchange_rate_id,
        &body.from_currency,
        &body.to_currency,
        &body.forex_amount.as_text(),
        state.config.forex_amount_bounds,
    )?;

    let order = state.exchange.create_order(&token, &request).await?;
    info!(
        order_id = order.order_id,
        from = %order.from_currency,
        to = %order.to_currency,
        "Order executed"
    );
    Ok(Json(CreateOrderResponse { order }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_input_accepts_number_and_string() {
        let body: CreateOrderBody = serde_json::from_value(serde_json::json!({
            "exchangeRateId": 1,
            "fromCurrency": "KRW",
            "toCurrency": "USD",
            "forexAmount": 12.5
        }))
        .unwrap();
        assert_eq!(body.forex_amount.as_text(), "12.5");

        let body: CreateOrderBody = serde_json::from_value(serde_json::json!({
            "exchangeRateId": 1,
            "fromCurrency": "KRW",
            "toCurrency": "USD",
            "forexAmount": "100"
        }))
        .unwrap();
        assert_eq!(body.forex_amount.as_text(), "100");
    }
}
