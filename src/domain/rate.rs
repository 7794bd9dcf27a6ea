//! Current market exchange rates.

use crate::domain::{Currency, Decimal, Timestamp};
use serde::{Deserialize, Serialize};

/// Latest KRW rate for one currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRate {
    /// Identifier the upstream requires when placing an order at this rate.
    pub exchange_rate_id: i64,
    pub currency: Currency,
    /// KRW per one unit of `currency`.
    pub rate: Decimal,
    #[serde(default)]
    pub change_percentage: Decimal,
    pub apply_date_time: String,
}

/// Rate list as served to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRatesData {
    pub rates: Vec<ExchangeRate>,
    pub updated_at: String,
}

impl ExchangeRatesData {
    /// `updated_at` is the first rate's apply time, or now when there are no rates.
    pub fn from_rates(rates: Vec<ExchangeRate>) -> Self {
        let updated_at = rates
            .first()
            .map(|r| r.apply_date_time.clone())
            .unwrap_or_else(|| Timestamp::now().to_rfc3339());
        ExchangeRatesData { rates, updated_at }
    }
}

/// First rate quoted for `currency`, if any.
pub fn find_rate<'a>(rates: &'a [ExchangeRate], currency: &Currency) -> Option<&'a ExchangeRate> {
    rates.iter().find(|r| &r.currency == currency)
}
