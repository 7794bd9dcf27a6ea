//! HTTP client for the upstream exchange API.

use super::{DataSourceError, ExchangeApi};
use crate::domain::{CreateOrderRequest, ExchangeRate, Order, Quote, QuoteRequest, WalletsData};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Success envelope `{code, message, data}`; only `data` is used.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Upstream exchange API reached over HTTP with bearer-token auth.
#[derive(Debug, Clone)]
pub struct HttpExchangeApi {
    client: Client,
    base_url: String,
}

impl HttpExchangeApi {
    /// Build a client whose requests all time out after `timeout`.
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, DataSourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DataSourceError::Other(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        token: &str,
    ) -> Result<T, DataSourceError> {
        let response = request
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| DataSourceError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| DataSourceError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            return Err(error_from_response(status, &body));
        }

        serde_json::from_slice::<Envelope<T>>(&body)
            .map(|envelope| envelope.data)
            .map_err(|e| DataSourceError::ParseError(e.to_string()))
    }
}

fn error_from_response(status: StatusCode, body: &[u8]) -> DataSourceError {
    let upstream = serde_json::from_slice::<ErrorEnvelope>(body).ok();
    let message = upstream
        .as_ref()
        .and_then(|e| e.message.clone())
        .filter(|m| !m.is_empty())
        .or_else(|| upstream.as_ref().and_then(|e| e.code.clone()))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Upstream error")
                .to_string()
        });

    if status == StatusCode::UNAUTHORIZED {
        DataSourceError::Unauthorized(message)
    } else {
        DataSourceError::HttpError {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl ExchangeApi for HttpExchangeApi {
    async fn fetch_wallets(&self, token: &str) -> Result<WalletsData, DataSourceError> {
        debug!("Fetching wallets");
        self.send(self.client.get(self.url("/wallets")), token).await
    }

    async fn fetch_orders(&self, token: &str) -> Result<Vec<Order>, DataSourceError> {
        debug!("Fetching orders");
        self.send(self.client.get(self.url("/orders")), token).await
    }

    async fn fetch_rates(&self, token: &str) -> Result<Vec<ExchangeRate>, DataSourceError> {
        debug!("Fetching latest exchange rates");
        // The upstream sends `data: null` when no rates are published yet.
        let rates: Option<Vec<ExchangeRate>> = self
            .send(self.client.get(self.url("/exchange-rates/latest")), token)
            .await?;
        Ok(rates.unwrap_or_default())
    }

    async fn fetch_quote(
        &self,
        token: &str,
        request: &QuoteRequest,
    ) -> Result<Quote, DataSourceError> {
        debug!(
            "Fetching quote from={}, to={}, amount={}",
            request.from_currency, request.to_currency, request.forex_amount
        );
        let query = [
            ("fromCurrency", request.from_currency.to_string()),
            ("toCurrency", request.to_currency.to_string()),
            ("forexAmount", request.forex_amount.to_canonical_string()),
        ];
        self.send(
            self.client.get(self.url("/orders/quote")).query(&query),
            token,
        )
        .await
    }

    async fn create_order(
        &self,
        token: &str,
        request: &CreateOrderRequest,
    ) -> Result<Order, DataSourceError> {
        debug!(
            "Creating order rate_id={}, from={}, to={}, amount={}",
            request.exchange_rate_id,
            request.from_currency,
            request.to_currency,
            request.forex_amount
        );
        self.send(self.client.post(self.url("/orders")).json(request), token)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_strips_trailing_slash() {
        let api =
            HttpExchangeApi::new("http://example.invalid/".to_string(), Duration::from_secs(1))
                .unwrap();
        assert_eq!(api.url("/wallets"), "http://example.invalid/wallets");
    }

    #[test]
    fn test_envelope_unwraps_data() {
        let body = br#"{"code":"OK","message":"success","data":[{"orderId":1,"fromCurrency":"KRW","fromAmount":130000,"toCurrency":"USD","toAmount":100,"appliedRate":1300,"orderedAt":"2025-01-01T00:00:00"}]}"#;
        let envelope: Envelope<Vec<Order>> = serde_json::from_slice(body).unwrap();
        assert_eq!(envelope.data.len(), 1);
        assert_eq!(envelope.data[0].order_id, 1);
    }

    #[test]
    fn test_error_uses_upstream_message() {
        let body = br#"{"code":"WALLET_INSUFFICIENT_BALANCE","message":"Insufficient balance","data":null}"#;
        assert_eq!(
            error_from_response(StatusCode::BAD_REQUEST, body),
            DataSourceError::HttpError {
                status: 400,
                message: "Insufficient balance".to_string()
            }
        );
    }

    #[test]
    fn test_error_falls_back_to_code_then_reason() {
        let body = br#"{"code":"NOT_FOUND","message":""}"#;
        assert_eq!(
            error_from_response(StatusCode::NOT_FOUND, body),
            DataSourceError::HttpError {
                status: 404,
                message: "NOT_FOUND".to_string()
            }
        );

        assert_eq!(
            error_from_response(StatusCode::BAD_GATEWAY, b"<html>"),
            DataSourceError::HttpError {
                status: 502,
                message: "Bad Gateway".to_string()
            }
        );
    }

    #[test]
    fn test_401_maps_to_unauthorized() {
        let body = br#"{"code":"UNAUTHORIZED","message":"token expired","data":null}"#;
        assert_eq!(
            error_from_response(StatusCode::UNAUTHORIZED, body),
            DataSourceError::Unauthorized("token expired".to_string())
        );
    }
}
