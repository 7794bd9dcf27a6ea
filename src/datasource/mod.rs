//! Data source abstraction over the upstream exchange API.

use crate::domain::{CreateOrderRequest, ExchangeRate, Order, Quote, QuoteRequest, WalletsData};
use async_trait::async_trait;
use std::fmt;

pub mod http;
pub mod mock;

pub use http::HttpExchangeApi;
pub use mock::MockExchangeApi;

/// Upstream exchange backend owning accounts, wallets, orders and rates.
///
/// Every call carries the caller's bearer token verbatim. Implementations do
/// not retry; a failed call is reported once and the caller decides whether to
/// degrade.
#[async_trait]
pub trait ExchangeApi: Send + Sync + fmt::Debug {
    /// Current balances of every wallet the user holds.
    async fn fetch_wallets(&self, token: &str) -> Result<WalletsData, DataSourceError>;

    /// The user's complete order history, across all currency pairs.
    async fn fetch_orders(&self, token: &str) -> Result<Vec<Order>, DataSourceError>;

    /// Latest KRW rate for every listed currency.
    async fn fetch_rates(&self, token: &str) -> Result<Vec<ExchangeRate>, DataSourceError>;

    async fn fetch_quote(
        &self,
        token: &str,
        request: &QuoteRequest,
    ) -> Result<Quote, DataSourceError>;

    /// Execute an order and return it as recorded upstream.
    async fn create_order(
        &self,
        token: &str,
        request: &CreateOrderRequest,
    ) -> Result<Order, DataSourceError>;
}

/// Error type for upstream operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSourceError {
    /// Connection failure, DNS failure or timeout.
    NetworkError(String),
    /// The upstream rejected the bearer token (HTTP 401).
    Unauthorized(String),
    /// Any other non-success status, with the upstream message if present.
    HttpError { status: u16, message: String },
    /// Response body did not match the expected envelope.
    ParseError(String),
    Other(String),
}

impl fmt::Display for DataSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSourceError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            DataSourceError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            DataSourceError::HttpError { status, message } => {
                write!(f, "HTTP error {}: {}", status, message)
            }
            DataSourceError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            DataSourceError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for DataSourceError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datasource_error_display() {
        let err = DataSourceError::NetworkError("connection timeout".to_string());
        assert_eq!(err.to_string(), "Network error: connection timeout");

        let err = DataSourceError::HttpError {
            status: 400,
            message: "Insufficient balance".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP error 400: Insufficient balance");

        let err = DataSourceError::Unauthorized("token expired".to_string());
        assert_eq!(err.to_string(), "Unauthorized: token expired");

        let err = DataSourceError::ParseError("invalid JSON".to_string());
        assert_eq!(err.to_string(), "Parse error: invalid JSON");
    }
}
