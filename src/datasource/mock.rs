//! Mock exchange API for testing without network calls.

use super::{DataSourceError, ExchangeApi};
use crate::domain::{
    find_rate, CreateOrderRequest, Currency, Decimal, ExchangeRate, Order, Quote, QuoteRequest,
    Timestamp, Wallet, WalletsData,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// In-memory exchange API returning predefined data.
///
/// Each fetch can be made to fail independently, and every call is counted so
/// tests can assert that rejected input never reached the upstream.
#[derive(Debug, Clone)]
pub struct MockExchangeApi {
    wallets: WalletsData,
    orders: Vec<Order>,
    rates: Vec<ExchangeRate>,
    token: Option<String>,
    wallets_error: Option<DataSourceError>,
    orders_error: Option<DataSourceError>,
    rates_error: Option<DataSourceError>,
    calls: Arc<AtomicUsize>,
}

impl MockExchangeApi {
    pub fn new() -> Self {
        Self {
            wallets: WalletsData {
                total_krw_balance: Decimal::zero(),
                wallets: Vec::new(),
            },
            orders: Vec::new(),
            rates: Vec::new(),
            token: None,
            wallets_error: None,
            orders_error: None,
            rates_error: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_total_krw_balance(mut self, total: Decimal) -> Self {
        self.wallets.total_krw_balance = total;
        self
    }

    pub fn with_wallet(mut self, wallet: Wallet) -> Self {
        self.wallets.wallets.push(wallet);
        self
    }

    pub fn with_order(mut self, order: Order) -> Self {
        self.orders.push(order);
        self
    }

    pub fn with_orders(mut self, orders: Vec<Order>) -> Self {
        self.orders.extend(orders);
        self
    }

    pub fn with_rate(mut self, rate: ExchangeRate) -> Self {
        self.rates.push(rate);
        self
    }

    /// Only accept this bearer token; anything else is answered with 401.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn failing_wallets(mut self, err: DataSourceError) -> Self {
        self.wallets_error = Some(err);
        self
    }

    pub fn failing_orders(mut self, err: DataSourceError) -> Self {
        self.orders_error = Some(err);
        self
    }

    pub fn failing_rates(mut self, err: DataSourceError) -> Self {
        self.rates_error = Some(err);
        self
    }

    /// Total number of upstream calls made so far, across clones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn enter(&self, token: &str, failure: &Option<DataSourceError>) -> Result<(), DataSourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(expected) = &self.token {
            if expected != token {
                return Err(DataSourceError::Unauthorized("invalid token".to_string()));
            }
        }
        match failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    /// KRW rate of the non-KRW leg of a pair.
    fn rate_for(&self, from: &Currency, to: &Currency) -> Result<&ExchangeRate, DataSourceError> {
        let forex = if from.is_krw() { to } else { from };
        find_rate(&self.rates, forex).ok_or_else(|| DataSourceError::HttpError {
            status: 400,
            message: format!("unsupported currency {}", forex),
        })
    }
}

impl Default for MockExchangeApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExchangeApi for MockExchangeApi {
    async fn fetch_wallets(&self, token: &str) -> Result<WalletsData, DataSourceError> {
        self.enter(token, &self.wallets_error)?;
        Ok(self.wallets.clone())
    }

    async fn fetch_orders(&self, token: &str) -> Result<Vec<Order>, DataSourceError> {
        self.enter(token, &self.orders_error)?;
        Ok(self.orders.clone())
    }

    async fn fetch_rates(&self, token: &str) -> Result<Vec<ExchangeRate>, DataSourceError> {
        self.enter(token, &self.rates_error)?;
        Ok(self.rates.clone())
    }

    async fn fetch_quote(
        &self,
        token: &str,
        request: &QuoteRequest,
    ) -> Result<Quote, DataSourceError> {
        self.enter(token, &None)?;
        let rate = self.rate_for(&request.from_currency, &request.to_currency)?;
        Ok(Quote {
            krw_amount: krw_amount(request.forex_amount, rate)?,
            applied_rate: rate.rate,
        })
    }

    async fn create_order(
        &self,
        token: &str,
        request: &CreateOrderRequest,
    ) -> Result<Order, DataSourceError> {
        self.enter(token, &None)?;
        let rate = self.rate_for(&request.from_currency, &request.to_currency)?;
        if rate.exchange_rate_id != request.exchange_rate_id {
            return Err(DataSourceError::HttpError {
                status: 400,
                message: "exchange rate is no longer current".to_string(),
            });
        }

        let krw = krw_amount(request.forex_amount, rate)?;
        let (from_amount, to_amount) = if request.from_currency.is_krw() {
            (krw, request.forex_amount)
        } else {
            (request.forex_amount, krw)
        };
        let next_id = self.orders.iter().map(|o| o.order_id).max().unwrap_or(0) + 1;

        Ok(Order {
            order_id: next_id,
            from_currency: request.from_currency.clone(),
            from_amount,
            to_currency: request.to_currency.clone(),
            to_amount,
            applied_rate: rate.rate,
            ordered_at: Timestamp::now(),
        })
    }
}

fn krw_amount(forex_amount: Decimal, rate: &ExchangeRate) -> Result<Decimal, DataSourceError> {
    forex_amount
        .checked_mul(rate.rate)
        .ok_or_else(|| DataSourceError::HttpError {
            status: 400,
            message: "forexAmount is too large".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AmountBounds;

    fn usd_rate() -> ExchangeRate {
        ExchangeRate {
            exchange_rate_id: 11,
            currency: Currency::new("USD"),
            rate: Decimal::from(1350),
            change_percentage: Decimal::zero(),
            apply_date_time: "2025-01-01T10:00:00".to_string(),
        }
    }

    #[test]
    fn test_mock_returns_wallets() {
        let mock = MockExchangeApi::new()
            .with_total_krw_balance(Decimal::from(1000))
            .with_wallet(Wallet::new(1, Currency::krw(), Decimal::from(1000)));

        let data = tokio_test::block_on(mock.fetch_wallets("t")).unwrap();
        assert_eq!(data.wallets.len(), 1);
        assert_eq!(data.total_krw_balance, Decimal::from(1000));
        assert_eq!(mock.calls(), 1);
    }

    #[test]
    fn test_mock_rejects_wrong_token() {
        let mock = MockExchangeApi::new().with_token("good");
        let err = tokio_test::block_on(mock.fetch_orders("bad")).unwrap_err();
        assert!(matches!(err, DataSourceError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_mock_failure_injection() {
        let mock = MockExchangeApi::new()
            .failing_rates(DataSourceError::NetworkError("down".to_string()));
        assert!(mock.fetch_rates("t").await.is_err());
        assert!(mock.fetch_orders("t").await.is_ok());
        assert_eq!(mock.calls(), 2);
    }

    #[tokio::test]
    async fn test_mock_quote_uses_rate() {
        let mock = MockExchangeApi::new().with_rate(usd_rate());
        let request = QuoteRequest::parse("KRW", "USD", "10", AmountBounds::default()).unwrap();
        let quote = mock.fetch_quote("t", &request).await.unwrap();
        assert_eq!(quote.krw_amount, Decimal::from(13500));
        assert_eq!(quote.applied_rate, Decimal::from(1350));
    }

    #[tokio::test]
    async fn test_mock_create_sell_order() {
        let mock = MockExchangeApi::new().with_rate(usd_rate());
        let request = CreateOrderRequest::parse(11, "USD", "KRW", "2", AmountBounds::default()).unwrap();
        let order = mock.create_order("t", &request).await.unwrap();
        assert_eq!(order.order_id, 1);
        assert_eq!(order.from_amount, Decimal::from(2));
        assert_eq!(order.to_amount, Decimal::from(2700));
    }

    #[tokio::test]
    async fn test_mock_create_order_with_stale_rate_id() {
        let mock = MockExchangeApi::new().with_rate(usd_rate());
        let request = CreateOrderRequest::parse(10, "KRW", "USD", "2", AmountBounds::default()).unwrap();
        let err = mock.create_order("t", &request).await.unwrap_err();
        assert!(matches!(err, DataSourceError::HttpError { status: 400, .. }));
    }

    #[tokio::test]
    async fn test_mock_quote_beyond_decimal_range_is_rejected() {
        let mut rate = usd_rate();
        rate.rate = Decimal::from(10_000_000_000);
        let mock = MockExchangeApi::new().with_rate(rate);
        let request = QuoteRequest::parse(
            "KRW",
            "USD",
            "100000000000000000000",
            AmountBounds::default(),
        )
        .unwrap();
        let err = mock.fetch_quote("t", &request).await.unwrap_err();
        assert!(matches!(err, DataSourceError::HttpError { status: 400, .. }));
    }
}
