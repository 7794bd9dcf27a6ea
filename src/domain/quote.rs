//! Quote and order-placement inputs and outputs.

use crate::domain::amount::{validate_amount, AmountBounds, AmountError};
use crate::domain::{Currency, Decimal};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Price the upstream would apply to an exchange of `forex_amount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub krw_amount: Decimal,
    pub applied_rate: Decimal,
}

/// Validated request for a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub from_currency: Currency,
    pub to_currency: Currency,
    pub forex_amount: Decimal,
}

/// Validated request to execute an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub exchange_rate_id: i64,
    pub from_currency: Currency,
    pub to_currency: Currency,
    pub forex_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExchangeInputError {
    #[error("{0}")]
    Currency(#[from] crate::domain::CurrencyParseError),
    #[error("exactly one of fromCurrency/toCurrency must be KRW")]
    NotKrwPair,
    #[error(transparent)]
    Amount(#[from] AmountError),
}

/// Parse and check a currency pair: both valid codes, exactly one of them KRW.
pub fn parse_krw_pair(from: &str, to: &str) -> Result<(Currency, Currency), ExchangeInputError> {
    let from: Currency = from.parse()?;
    let to: Currency = to.parse()?;
    if from.is_krw() == to.is_krw() {
        return Err(ExchangeInputError::NotKrwPair);
    }
    Ok((from, to))
}

impl QuoteRequest {
    pub fn parse(
        from: &str,
        to: &str,
        forex_amount: &str,
        bounds: AmountBounds,
    ) -> Result<Self, ExchangeInputError> {
        let (from_currency, to_currency) = parse_krw_pair(from, to)?;
        let forex_amount = validate_amount(forex_amount, "forexAmount", bounds)?;
        Ok(QuoteRequest {
            from_currency,
            to_currency,
            forex_amount,
        })
    }
}

impl CreateOrderRequest {
    pub fn parse(
        exchange_rate_id: i64,
        from: &str,
        to: &str,
        forex_amount: &str,
        bounds: AmountBounds,
    ) -> Result<Self, ExchangeInputError> {
        let (from_currency, to_currency) = parse_krw_pair(from, to)?;
        let forex_amount = validate_amount(forex_amount, "forexAmount", bounds)?;
        Ok(CreateOrderRequest {
            exchange_rate_id,
            from_currency,
            to_currency,
            forex_amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_request_normalizes_currencies() {
        let req = QuoteRequest::parse("krw", " usd", "100", AmountBounds::default()).unwrap();
        assert_eq!(req.from_currency, Currency::krw());
        assert_eq!(req.to_currency, Currency::new("USD"));
        assert_eq!(req.forex_amount, Decimal::from(100));
    }

    #[test]
    fn test_pair_must_include_exactly_one_krw() {
        assert_eq!(
            QuoteRequest::parse("USD", "JPY", "1", AmountBounds::default()),
            Err(ExchangeInputError::NotKrwPair)
        );
        assert_eq!(
            QuoteRequest::parse("KRW", "KRW", "1", AmountBounds::default()),
            Err(ExchangeInputError::NotKrwPair)
        );
    }

    #[test]
    fn test_invalid_amount_is_rejected() {
        assert!(matches!(
            CreateOrderRequest::parse(1, "USD", "KRW", "-5", AmountBounds::default()),
            Err(ExchangeInputError::Amount(AmountError::NotPositive { .. }))
        ));
        assert!(matches!(
            QuoteRequest::parse("KRW", "USD", "1e3", AmountBounds::default()),
            Err(ExchangeInputError::Amount(AmountError::Malformed { .. }))
        ));
    }

    #[test]
    fn test_create_order_request_serializes_camel_case() {
        let req = CreateOrderRequest::parse(42, "KRW", "USD", "10.5", AmountBounds::default()).unwrap();
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["exchangeRateId"], 42);
        assert_eq!(json["fromCurrency"], "KRW");
        assert_eq!(json["toCurrency"], "USD");
        assert_eq!(json["forexAmount"].as_f64(), Some(10.5));
    }

    #[test]
    fn test_configured_bounds_apply_to_forex_amount() {
        let bounds = AmountBounds {
            min: None,
            max: Some(Decimal::from(1000)),
        };
        assert!(QuoteRequest::parse("KRW", "USD", "1000", bounds).is_ok());
        assert_eq!(
            CreateOrderRequest::parse(1, "KRW", "USD", "1000.5", bounds)
                .unwrap_err()
                .to_string(),
            "forexAmount must be at most 1000"
        );
    }
}
